// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details.
//! The HTTP implementation lives in `client`, response decoding in `parser`.

mod classify;
pub mod client;
mod pagination;
pub mod parser;
mod search;
mod types;

use crate::error::FetchError;
use crate::model::{Block, Database, Page};
use crate::types::NotionId;

pub use classify::classify;
pub use client::NotionHttpClient;
pub use pagination::Pager;
pub use search::{list_pages, PageSummary};
pub use types::PaginatedResponse;

/// The ability to retrieve content from a Notion workspace.
///
/// Listing methods return a single page of results; callers follow
/// cursors through a [`Pager`].
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, FetchError>;

    /// Linked database views come back as `Ok` with
    /// [`DatabaseSource::Linked`](crate::model::DatabaseSource::Linked).
    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, FetchError>;

    async fn query_database(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Page>, FetchError>;

    async fn list_block_children(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, FetchError>;

    /// Every page shared with the integration.
    async fn search_pages(&self, cursor: Option<String>)
        -> Result<PaginatedResponse<Page>, FetchError>;
}
