// src/api/types.rs
//! Wire types shared by the Notion API endpoints.

use serde::Deserialize;

/// Generic paginated response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A response holding one batch of a listing.
    pub fn batch(results: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            object: "list".to_string(),
            has_more: next_cursor.is_some(),
            results,
            next_cursor,
        }
    }

    /// Whether another request with `next_cursor` would return more items.
    pub fn continues(&self) -> bool {
        self.has_more && self.next_cursor.is_some()
    }
}

/// Error response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionApiErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    pub code: String,
    #[serde(default)]
    pub message: String,
}
