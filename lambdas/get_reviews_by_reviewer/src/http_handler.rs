use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{LookupOutcome, ReviewRepository};
use shared::request::required_path_param;
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

    let reviewer_name = match required_path_param(&event, "reviewerName") {
        Ok(reviewer_name) => reviewer_name,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let reviews = deps.review_repo.reviews_by_reviewer(reviewer_name).await;

    lookup_response(reviews.map(LookupOutcome::from))
}
