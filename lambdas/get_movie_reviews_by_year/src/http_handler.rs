use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{lookup_reviews, ReviewQuery, ReviewRepository};
use shared::request::{movie_id, required_path_param};
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

    let (movie_id, year) = match movie_id(&event)
        .and_then(|movie_id| required_path_param(&event, "year").map(|year| (movie_id, year)))
    {
        Ok(params) => params,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };

    // The path segment is already known to be a year, so it is used as-is.
    let query = ReviewQuery::ByYear {
        movie_id,
        year: year.to_string(),
    };

    lookup_response(lookup_reviews(&deps.review_repo, &query).await)
}
