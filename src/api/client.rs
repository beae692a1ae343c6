// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations; parsing lives in `parser`.

use super::parser;
use super::types::PaginatedResponse;
use crate::constants::{API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::{AppError, FetchError};
use crate::model::{Block, Database, Page};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::json;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Same as [`NotionHttpClient::new`] but against another host.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

fn paged_body(cursor: Option<String>) -> serde_json::Value {
    let mut body = json!({ "page_size": NOTION_API_PAGE_SIZE });
    if let Some(cursor) = cursor {
        body["start_cursor"] = json!(cursor);
    }
    body
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, FetchError> {
        let endpoint = format!("pages/{}", id);
        let response = self.get(&endpoint, &[]).await?;
        parser::parse_page_response(extract_response_text(response).await?)
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, FetchError> {
        let endpoint = format!("databases/{}", id);
        let response = self.get(&endpoint, &[]).await?;
        match parser::parse_database_response(extract_response_text(response).await?) {
            Err(e) if e.is_linked_database() => {
                log::debug!("Database {} is a linked view: {}", id, e);
                Ok(Database::linked(id.clone()))
            }
            other => other,
        }
    }

    async fn query_database(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Page>, FetchError> {
        let endpoint = format!("databases/{}/query", id);
        let response = self.post(&endpoint, &paged_body(cursor)).await?;
        parser::parse_pages_pagination(extract_response_text(response).await?)
    }

    async fn list_block_children(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, FetchError> {
        let endpoint = format!("blocks/{}/children", id);
        let page_size = NOTION_API_PAGE_SIZE.to_string();
        let mut query = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = cursor.as_deref() {
            query.push(("start_cursor", cursor));
        }
        let response = self.get(&endpoint, &query).await?;
        parser::parse_blocks_pagination(extract_response_text(response).await?)
    }

    async fn search_pages(
        &self,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Page>, FetchError> {
        let mut body = paged_body(cursor);
        body["filter"] = json!({ "value": "page", "property": "object" });
        let response = self.post("search", &body).await?;
        parser::parse_pages_pagination(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
    /// Seconds from the `Retry-After` header, when the API sent one.
    pub retry_after: Option<u64>,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, FetchError> {
    let status = response.status();
    let url = response.url().to_string();
    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok());
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
        retry_after,
    })
}
