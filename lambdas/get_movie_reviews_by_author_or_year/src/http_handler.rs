use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{lookup_reviews, ReviewQuery, ReviewRepository};
use shared::request::{movie_id, required_path_param};
use shared::utils::{lookup_response, message_response};

pub(crate) struct HandlerDeps<R: ReviewRepository> {
    pub review_repo: R,
}

/// GET /movies/{movieId}/reviews/{inputPara}
///
/// `inputPara` is either a review year or a reviewer name; see
/// [`ReviewQuery::classify`] for how the two are told apart.
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
    let input_para = match required_path_param(&event, "inputPara") {
        Ok(input_para) => input_para,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let query = ReviewQuery::classify(movie_id, input_para);
    tracing::info!("Resolved lookup: {:?}", query);

    lookup_response(lookup_reviews(&deps.review_repo, &query).await)
}
