use crate::core::{
    RepositoryError, Review, ReviewQuery, ReviewRecord, ReviewRepository, TranslateError,
    Translation, Translator,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use lambda_http::tracing;
use std::collections::HashMap;

/// The expressions for a single DynamoDB query, separated from the client call.
#[derive(Debug, PartialEq)]
pub struct QueryParts {
    pub key_condition_expression: String,
    pub filter_expression: Option<String>,
    pub expression_attribute_values: HashMap<String, AttributeValue>,
}

impl From<&ReviewQuery> for QueryParts {
    fn from(query: &ReviewQuery) -> Self {
        let mut values = HashMap::new();
        values.insert(":m".to_string(), AttributeValue::N(query.movie_id().to_string()));

        match query {
            ReviewQuery::ByReviewer { reviewer_name, .. } => {
                values.insert(":rN".to_string(), AttributeValue::S(reviewer_name.clone()));
                QueryParts {
                    key_condition_expression: "MovieId = :m AND ReviewerName = :rN".to_string(),
                    filter_expression: None,
                    expression_attribute_values: values,
                }
            }
            ReviewQuery::ByYear { year, .. } => {
                values.insert(":year".to_string(), AttributeValue::S(year.clone()));
                QueryParts {
                    key_condition_expression: "MovieId = :m".to_string(),
                    filter_expression: Some("begins_with(ReviewDate, :year)".to_string()),
                    expression_attribute_values: values,
                }
            }
            ReviewQuery::ByMovie { min_rating, .. } => {
                let filter_expression = (*min_rating).map(|min_rating| {
                    values.insert(
                        ":minRating".to_string(),
                        AttributeValue::N(min_rating.to_string()),
                    );
                    "Rating >= :minRating".to_string()
                });
                QueryParts {
                    key_condition_expression: "MovieId = :m".to_string(),
                    filter_expression,
                    expression_attribute_values: values,
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct DynamoDbReviewRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbReviewRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

fn records_from_items(
    items: Option<Vec<HashMap<String, AttributeValue>>>,
) -> Result<Vec<ReviewRecord>, RepositoryError> {
    serde_dynamo::from_items(items.unwrap_or_default())
        .map_err(|e| RepositoryError::Malformed(e.to_string()))
}

#[async_trait]
impl ReviewRepository for DynamoDbReviewRepository {
    async fn query_reviews(
        &self,
        query: &ReviewQuery,
    ) -> Result<Vec<ReviewRecord>, RepositoryError> {
        let parts = QueryParts::from(query);
        tracing::info!(
            key_condition = %parts.key_condition_expression,
            filter = ?parts.filter_expression,
            "Querying reviews for movie {}",
            query.movie_id()
        );

        let result = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(parts.key_condition_expression)
            .set_filter_expression(parts.filter_expression)
            .set_expression_attribute_values(Some(parts.expression_attribute_values))
            .send()
            .await
            .map_err(|e| RepositoryError::Store(DisplayErrorContext(&e).to_string()))?;

        records_from_items(result.items)
    }

    async fn reviews_by_reviewer(
        &self,
        reviewer_name: &str,
    ) -> Result<Vec<ReviewRecord>, RepositoryError> {
        let result = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("ReviewerName = :rN")
            .expression_attribute_values(":rN", AttributeValue::S(reviewer_name.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::Store(DisplayErrorContext(&e).to_string()))?;

        records_from_items(result.items)
    }

    async fn add_review(&self, review: &Review) -> Result<(), RepositoryError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(review)
            .map_err(|e| RepositoryError::Malformed(e.to_string()))?;

        let result = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(
                "attribute_not_exists(MovieId) AND attribute_not_exists(ReviewerName)",
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let generic_err_msg = DisplayErrorContext(&e).to_string();
                if e.into_service_error().is_conditional_check_failed_exception() {
                    Err(RepositoryError::AlreadyExists {
                        movie_id: review.movie_id,
                        reviewer_name: review.reviewer_name.clone(),
                    })
                } else {
                    Err(RepositoryError::Store(generic_err_msg))
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct AwsTranslator {
    translate_client: aws_sdk_translate::Client,
}

impl AwsTranslator {
    pub fn new(translate_client: aws_sdk_translate::Client) -> Self {
        Self { translate_client }
    }
}

#[async_trait]
impl Translator for AwsTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Translation, TranslateError> {
        let output = self
            .translate_client
            .translate_text()
            .text(text)
            .source_language_code(source_language)
            .target_language_code(target_language)
            .send()
            .await
            .map_err(|e| {
                TranslateError(aws_sdk_translate::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(Translation {
            translated_text: output.translated_text().to_string(),
            source_language_code: output.source_language_code().to_string(),
            target_language_code: output.target_language_code().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn n(value: i64) -> AttributeValue {
        AttributeValue::N(value.to_string())
    }

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    #[test]
    fn year_query_filters_on_review_date_prefix() {
        let parts = QueryParts::from(&ReviewQuery::classify(1234, "2024"));

        assert_eq!(parts.key_condition_expression, "MovieId = :m");
        assert_eq!(
            parts.filter_expression.as_deref(),
            Some("begins_with(ReviewDate, :year)")
        );
        assert_eq!(
            parts.expression_attribute_values,
            HashMap::from([(":m".to_string(), n(1234)), (":year".to_string(), s("2024"))])
        );
    }

    #[test]
    fn reviewer_query_matches_full_key_without_filter() {
        let parts = QueryParts::from(&ReviewQuery::classify(1234, "R01"));

        assert_eq!(
            parts.key_condition_expression,
            "MovieId = :m AND ReviewerName = :rN"
        );
        assert_eq!(parts.filter_expression, None);
        assert_eq!(
            parts.expression_attribute_values,
            HashMap::from([(":m".to_string(), n(1234)), (":rN".to_string(), s("R01"))])
        );
    }

    #[test]
    fn movie_query_without_min_rating_has_no_filter() {
        let parts = QueryParts::from(&ReviewQuery::ByMovie {
            movie_id: 2345,
            min_rating: None,
        });

        assert_eq!(parts.key_condition_expression, "MovieId = :m");
        assert_eq!(parts.filter_expression, None);
        assert_eq!(parts.expression_attribute_values.len(), 1);
    }

    #[test]
    fn movie_query_with_min_rating_filters_on_rating() {
        let parts = QueryParts::from(&ReviewQuery::ByMovie {
            movie_id: 2345,
            min_rating: Some(5),
        });

        assert_eq!(parts.filter_expression.as_deref(), Some("Rating >= :minRating"));
        assert_eq!(
            parts.expression_attribute_values.get(":minRating"),
            Some(&n(5))
        );
    }

    #[test]
    fn items_are_read_with_every_attribute() {
        let item = HashMap::from([
            ("MovieId".to_string(), n(2345)),
            ("ReviewerName".to_string(), s("R04")),
            ("ReviewDate".to_string(), s("2024-02-01")),
            ("Content".to_string(), s("BETTER than their last one.")),
            ("Rating".to_string(), n(3)),
            ("Verified".to_string(), AttributeValue::Bool(true)),
        ]);

        let records = records_from_items(Some(vec![item])).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            serde_json::to_value(&records[0]).unwrap(),
            json!({
                "MovieId": 2345,
                "ReviewerName": "R04",
                "ReviewDate": "2024-02-01",
                "Content": "BETTER than their last one.",
                "Rating": 3,
                "Verified": true
            })
        );
    }

    #[test]
    fn missing_items_are_an_empty_result() {
        let records = records_from_items(None).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn item_without_content_is_still_returned() {
        let item = HashMap::from([
            ("MovieId".to_string(), n(2345)),
            ("ReviewerName".to_string(), s("R04")),
            ("ReviewDate".to_string(), s("2024-02-01")),
            ("Rating".to_string(), n(3)),
        ]);

        let records = records_from_items(Some(vec![item])).unwrap();

        assert_eq!(records[0].content(), None);
        assert_eq!(records[0].0.get("ReviewerName"), Some(&json!("R04")));
    }

    #[test]
    fn review_is_written_with_store_attribute_names() {
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(Review::new(6789, "R05", "2023-03-01", "GOOD", 9)).unwrap();

        assert_eq!(item.get("MovieId"), Some(&n(6789)));
        assert_eq!(item.get("ReviewerName"), Some(&s("R05")));
        assert_eq!(item.get("Rating"), Some(&n(9)));
    }
}
