use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use thiserror::Error;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

/// A single movie review as stored in the reviews table.
///
/// Attribute names are PascalCase both in DynamoDB and in JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Review {
    pub movie_id: i64,
    pub reviewer_name: String,
    pub review_date: String,
    pub content: String,
    pub rating: i64,
}

impl Review {
    pub fn new(
        movie_id: i64,
        reviewer_name: impl Into<String>,
        review_date: impl Into<String>,
        content: impl Into<String>,
        rating: i64,
    ) -> Self {
        Self {
            movie_id,
            reviewer_name: reviewer_name.into(),
            review_date: review_date.into(),
            content: content.into(),
            rating,
        }
    }

    /// True when `review_date` has the `YYYY-MM-DD` shape the year filter relies on.
    pub fn has_valid_date(&self) -> bool {
        let bytes = self.review_date.as_bytes();
        bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    }
}

/// A review item exactly as the store returned it, including attributes
/// `Review` does not model. Read endpoints hand these back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewRecord(pub Map<String, Value>);

impl ReviewRecord {
    pub fn content(&self) -> Option<&str> {
        self.0.get("Content").and_then(Value::as_str)
    }
}

impl From<Review> for ReviewRecord {
    fn from(review: Review) -> Self {
        let mut attributes = Map::new();
        attributes.insert("MovieId".to_string(), review.movie_id.into());
        attributes.insert("ReviewerName".to_string(), review.reviewer_name.into());
        attributes.insert("ReviewDate".to_string(), review.review_date.into());
        attributes.insert("Content".to_string(), review.content.into());
        attributes.insert("Rating".to_string(), review.rating.into());
        ReviewRecord(attributes)
    }
}

/// What to look up in the reviews table for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewQuery {
    ByReviewer { movie_id: i64, reviewer_name: String },
    ByYear { movie_id: i64, year: String },
    ByMovie { movie_id: i64, min_rating: Option<i64> },
}

impl ReviewQuery {
    /// Decide between a year lookup and a reviewer lookup from one path token.
    ///
    /// Exactly four ASCII digits are read as a year. A reviewer literally named
    /// e.g. "2024" is therefore routed to the year filter and will not be found.
    pub fn classify(movie_id: i64, input_para: &str) -> Self {
        if is_year(input_para) {
            ReviewQuery::ByYear {
                movie_id,
                year: input_para.to_string(),
            }
        } else {
            ReviewQuery::ByReviewer {
                movie_id,
                reviewer_name: input_para.to_string(),
            }
        }
    }

    pub fn movie_id(&self) -> i64 {
        match self {
            ReviewQuery::ByReviewer { movie_id, .. }
            | ReviewQuery::ByYear { movie_id, .. }
            | ReviewQuery::ByMovie { movie_id, .. } => *movie_id,
        }
    }
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("review store request failed: {0}")]
    Store(String),
    #[error("malformed review item: {0}")]
    Malformed(String),
    #[error("review by {reviewer_name} for movie {movie_id} already exists")]
    AlreadyExists { movie_id: i64, reviewer_name: String },
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait ReviewRepository: Debug {
    async fn query_reviews(
        &self,
        query: &ReviewQuery,
    ) -> Result<Vec<ReviewRecord>, RepositoryError>;
    async fn reviews_by_reviewer(
        &self,
        reviewer_name: &str,
    ) -> Result<Vec<ReviewRecord>, RepositoryError>;
    async fn add_review(&self, review: &Review) -> Result<(), RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Translation {
    pub translated_text: String,
    pub source_language_code: String,
    pub target_language_code: String,
}

#[derive(Debug, Error)]
#[error("translation failed: {0}")]
pub struct TranslateError(pub String);

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait Translator: Debug {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Translation, TranslateError>;
}

/// Outcome of a read that may legitimately match nothing.
#[derive(Debug, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<ReviewRecord>),
    NotFound,
}

impl From<Vec<ReviewRecord>> for LookupOutcome {
    fn from(reviews: Vec<ReviewRecord>) -> Self {
        if reviews.is_empty() {
            LookupOutcome::NotFound
        } else {
            LookupOutcome::Found(reviews)
        }
    }
}

/// Run a single query against the store and classify the result.
pub async fn lookup_reviews<R: ReviewRepository + ?Sized>(
    repo: &R,
    query: &ReviewQuery,
) -> Result<LookupOutcome, RepositoryError> {
    repo.query_reviews(query).await.map(LookupOutcome::from)
}
