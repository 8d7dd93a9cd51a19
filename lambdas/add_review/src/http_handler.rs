use lambda_http::RequestPayloadExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{RepositoryError, Review, ReviewRepository};
use shared::utils::{error_response, json_response, message_response};

pub(crate) struct HandlerDeps<R: ReviewRepository> {
    pub review_repo: R,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: ReviewRepository>(
    deps: &HandlerDeps<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let review = match event.payload::<Review>() {
        Ok(Some(review)) => review,
        Ok(None) => return message_response(&StatusCode::BAD_REQUEST, "Missing review body."),
        Err(e) => {
            tracing::warn!("Rejected review body: {}", e);
            return message_response(&StatusCode::BAD_REQUEST, "Invalid review body.");
        }
    };

    if review.reviewer_name.is_empty() {
        return message_response(&StatusCode::BAD_REQUEST, "Missing ReviewerName.");
    }
    if !review.has_valid_date() {
        return message_response(
            &StatusCode::BAD_REQUEST,
            "ReviewDate must be formatted as YYYY-MM-DD.",
        );
    }

    match deps.review_repo.add_review(&review).await {
        Ok(()) => json_response(&StatusCode::CREATED, &review),
        Err(e @ RepositoryError::AlreadyExists { .. }) => {
            tracing::info!("{}", e);
            message_response(&StatusCode::CONFLICT, &e.to_string())
        }
        Err(e) => {
            tracing::error!("Failed to add review: {}", e);
            error_response(&e)
        }
    }
}
