use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{lookup_reviews, ReviewQuery, ReviewRepository};
use shared::request::{movie_id, parse_integer, query_param};
use shared::utils::{lookup_response, message_response};

pub(crate) struct HandlerDeps<R: ReviewRepository> {
    pub review_repo: R,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: ReviewRepository>(
    deps: &HandlerDeps<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let movie_id = match movie_id(&event) {
        Ok(movie_id) => movie_id,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let min_rating = match query_param(&event, "minRating")
        .map(|value| parse_integer(value, "minRating"))
        .transpose()
    {
        Ok(min_rating) => min_rating,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let query = ReviewQuery::ByMovie {
        movie_id,
        min_rating,
    };

    lookup_response(lookup_reviews(&deps.review_repo, &query).await)
}

#[cfg(test)]
mod tests {
    use super::{function_handler, HandlerDeps};
    use lambda_http::http::Request;
    use lambda_http::{Body, IntoResponse, RequestExt};
    use mockall::predicate::eq;
    use serde_json::Value;
    use shared::core::{MockReviewRepository, Review, ReviewQuery};
    use std::collections::HashMap;

    fn request(movie_id: &str, query: Option<(&str, &str)>) -> lambda_http::Request {
        let mut path_params = HashMap::new();
        path_params.insert("movieId".to_string(), movie_id.to_string());
        let mut query_string = HashMap::new();
        if let Some((key, value)) = query {
            query_string.insert(key.to_string(), value.to_string());
        }
        Request::builder()
            .body(Body::Empty)
            .unwrap()
            .with_path_parameters(path_params)
            .with_query_string_parameters(query_string)
    }

    #[tokio::test]
    async fn when_valid_request_made_should_return_all_movie_reviews() {
        let mut mock_review_repo = MockReviewRepository::default();
        mock_review_repo
            .expect_query_reviews()
            .times(1)
            .with(eq(ReviewQuery::ByMovie {
                movie_id: 2345,
                min_rating: None,
            }))
            .returning(|_query| {
                Ok(vec![
                    Review::new(2345, "R01", "2024-01-28", "Quite GOOD !!!", 10).into(),
                    Review::new(2345, "R04", "2024-02-01", "BETTER than their last one.", 3).into(),
                ])
            });
        let deps = HandlerDeps {
            review_repo: mock_review_repo,
        };

        let result = function_handler(&deps, request("2345", None)).await;

        let data = result.unwrap().into_response().await;
        assert_eq!(data.status(), 200);
        let body: Value = serde_json::from_slice(data.body()).unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn when_min_rating_given_should_pass_it_to_the_query() {
        let mut mock_review_repo = MockReviewRepository::default();
        mock_review_repo
            .expect_query_reviews()
            .times(1)
            .with(eq(ReviewQuery::ByMovie {
                movie_id: 2345,
                min_rating: Some(5),
            }))
            .returning(|_query| {
                Ok(vec![Review::new(2345, "R01", "2024-01-28", "Quite GOOD !!!", 10).into()])
            });
        let deps = HandlerDeps {
            review_repo: mock_review_repo,
        };

        let result = function_handler(&deps, request("2345", Some(("minRating", "5")))).await;

        let data = result.unwrap().into_response().await;
        assert_eq!(data.status(), 200);
    }

    #[tokio::test]
    async fn when_min_rating_invalid_should_return_400() {
        let mut mock_review_repo = MockReviewRepository::default();
        mock_review_repo.expect_query_reviews().times(0);
        let deps = HandlerDeps {
            review_repo: mock_review_repo,
        };

        let result = function_handler(&deps, request("2345", Some(("minRating", "high")))).await;

        let data = result.unwrap().into_response().await;
        assert_eq!(data.status(), 400);
    }

    #[tokio::test]
    async fn when_movie_has_no_reviews_should_return_404() {
        let mut mock_review_repo = MockReviewRepository::default();
        mock_review_repo
            .expect_query_reviews()
            .times(1)
            .returning(|_query| Ok(vec![]));
        let deps = HandlerDeps {
            review_repo: mock_review_repo,
        };

        let result = function_handler(&deps, request("1", None)).await;

        let data = result.unwrap().into_response().await;
        assert_eq!(data.status(), 404);
    }
}
