use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use serde_json::json;
use shared::core::{lookup_reviews, LookupOutcome, ReviewQuery, ReviewRepository, Translator};
use shared::request::{movie_id, query_param, required_path_param};
use shared::utils::{error_response, json_response, message_response};

const SOURCE_LANGUAGE: &str = "en";

pub(crate) struct HandlerDeps<R: ReviewRepository, T: Translator> {
    pub review_repo: R,
    pub translator: T,
}

/// GET /reviews/{reviewerName}/{movieId}/translation?language=code
#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: ReviewRepository, T: Translator>(
    deps: &HandlerDeps<R, T>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let reviewer_name = match required_path_param(&event, "reviewerName") {
        Ok(reviewer_name) => reviewer_name,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let movie_id = match movie_id(&event) {
        Ok(movie_id) => movie_id,
        Err(e) => return message_response(&StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let Some(language) = query_param(&event, "language") else {
        return message_response(&StatusCode::BAD_REQUEST, "Missing language.");
    };

    let query = ReviewQuery::ByReviewer {
        movie_id,
        reviewer_name: reviewer_name.to_string(),
    };
    let review = match lookup_reviews(&deps.review_repo, &query).await {
        Ok(LookupOutcome::Found(mut reviews)) => reviews.swap_remove(0),
        Ok(LookupOutcome::NotFound) => {
            tracing::info!("No reviews found.");
            return message_response(&StatusCode::NOT_FOUND, "No reviews found.");
        }
        Err(e) => {
            tracing::error!("Failed to read review: {}", e);
            return error_response(&e);
        }
    };

    let Some(text) = review.content().filter(|text| !text.is_empty()) else {
        return message_response(&StatusCode::BAD_REQUEST, "Missing text.");
    };

    match deps
        .translator
        .translate(text, SOURCE_LANGUAGE, language)
        .await
    {
        Ok(translated_message) => json_response(
            &StatusCode::OK,
            &json!({ "translatedMessage": translated_message }),
        ),
        Err(e) => {
            tracing::error!("error in the translation: {}", e);
            error_response(&format!("unable to translate the message: {}", e))
        }
    }
}
