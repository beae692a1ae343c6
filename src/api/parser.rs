// src/api/parser.rs
//! Turns raw API responses into model types or typed fetch errors.

use super::client::ApiResponse;
use super::types::{NotionApiErrorResponse, PaginatedResponse};
use crate::error::{FetchError, NotionErrorCode};
use crate::model::{Block, Database, Page};

/// How much of an unparseable body is kept for the error message.
const BODY_PREVIEW_LEN: usize = 200;

/// Parse any Notion API response body, success or error.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(
            &result.data,
            result.status.as_u16(),
            result.retry_after,
            &result.url,
        ))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        FetchError::MalformedResponse {
            reason: format!("{} (body: {})", e, preview(body)),
        }
    })
}

/// Builds the fetch error for a non-success response.
///
/// Notion answers with `{"object":"error","code":..,"message":..}`; when the
/// body is something else (a proxy page, an empty body) the HTTP status
/// decides.
pub fn parse_error(body: &str, status: u16, retry_after: Option<u64>, url: &str) -> FetchError {
    let error = match serde_json::from_str::<NotionApiErrorResponse>(body) {
        Ok(api_error) => FetchError::from_api(
            api_error.status.unwrap_or(status),
            NotionErrorCode::from_api_response(&api_error.code),
            api_error.message,
        ),
        Err(_) => FetchError::from_api(
            status,
            NotionErrorCode::from_http_status(status),
            format!("HTTP {} from {}", status, url),
        ),
    };

    match error {
        FetchError::RateLimited { .. } => FetchError::RateLimited {
            retry_after_seconds: retry_after,
        },
        other => other,
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, FetchError> {
    parse_api_response(result)
}

pub fn parse_database_response(result: ApiResponse<String>) -> Result<Database, FetchError> {
    parse_api_response(result)
}

pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, FetchError> {
    parse_api_response(result)
}

pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, FetchError> {
    parse_api_response(result)
}
