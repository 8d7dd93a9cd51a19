use lambda_http::{Request, RequestExt};
use thiserror::Error;

/// A request that cannot be turned into a store query.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("Missing {0}.")]
    Missing(&'static str),
    #[error("Invalid {0}: expected an integer.")]
    NotAnInteger(&'static str),
}

pub fn path_param<'a>(event: &'a Request, name: &str) -> Option<&'a str> {
    event
        .path_parameters_ref()
        .and_then(|params| params.first(name))
        .filter(|value| !value.is_empty())
}

pub fn query_param<'a>(event: &'a Request, name: &str) -> Option<&'a str> {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first(name))
        .filter(|value| !value.is_empty())
}

pub fn required_path_param<'a>(
    event: &'a Request,
    name: &'static str,
) -> Result<&'a str, InvalidInput> {
    path_param(event, name).ok_or(InvalidInput::Missing(name))
}

/// Whitespace is not stripped: `" 12 "` is not an integer.
pub fn parse_integer(value: &str, name: &'static str) -> Result<i64, InvalidInput> {
    value
        .parse::<i64>()
        .map_err(|_| InvalidInput::NotAnInteger(name))
}

pub fn movie_id(event: &Request) -> Result<i64, InvalidInput> {
    required_path_param(event, "movieId").and_then(|value| parse_integer(value, "movieId"))
}
