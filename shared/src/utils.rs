use crate::core::{LookupOutcome, RepositoryError, ReviewRecord};
use lambda_http::http::StatusCode;
use lambda_http::{tracing, Error, Response};
use serde::Serialize;
use serde_json::json;

pub const NO_REVIEWS_FOUND: &str =
    "No reviews found. Verify movie Id and reviewer name/review year and try again.";

#[derive(Debug, Serialize)]
pub struct ReviewsBody<'a> {
    pub data: &'a [ReviewRecord],
}

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(serde_json::to_string(&body)?)
        .map_err(Box::new)?;

    Ok(response)
}

/// `{ "Message": ... }`, used for client errors and empty results.
pub fn message_response(status: &StatusCode, message: &str) -> Result<Response<String>, Error> {
    json_response(status, &json!({ "Message": message }))
}

/// `{ "error": ... }` with a 500 status.
pub fn error_response(detail: &impl ToString) -> Result<Response<String>, Error> {
    json_response(
        &StatusCode::INTERNAL_SERVER_ERROR,
        &json!({ "error": detail.to_string() }),
    )
}

/// Map a classified lookup into the HTTP response every read endpoint shares.
pub fn lookup_response(
    outcome: Result<LookupOutcome, RepositoryError>,
) -> Result<Response<String>, Error> {
    match outcome {
        Ok(LookupOutcome::Found(reviews)) => {
            json_response(&StatusCode::OK, &ReviewsBody { data: &reviews })
        }
        Ok(LookupOutcome::NotFound) => {
            tracing::info!("No reviews matched the request");
            message_response(&StatusCode::NOT_FOUND, NO_REVIEWS_FOUND)
        }
        Err(e) => {
            tracing::error!("Failed to read reviews: {}", e);
            error_response(&e)
        }
    }
}
