// src/lib.rs
//! notion-harvest library. Flattens a Notion workspace tree into an
//! indented plain-text corpus.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FetchError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `HarvestConfig`
//! - **Domain model**: `Page`, `Database`, `Block`, `PropertyValue`, `NodeKind`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `Pager`, `classify`
//! - **Crawl**: `Crawler`, `harvest`, `ProcessedSet`, output sinks

mod api;
mod config;
mod constants;
mod crawl;
mod error;
mod formatting;
mod model;
mod output;
mod state;
mod types;

// --- Error Handling ---
pub use crate::error::{
    AppError, ErrorClass, FetchError, NotionErrorCode, PropertyParseError,
};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{resolve_api_key, Command, CommandLineInput, CrawlArgs, HarvestConfig};
pub use crate::constants::{DEFAULT_INDENT_UNIT, DEPTH_STEP, LOG_FILE_NAME};

// --- Domain Model ---
pub use crate::model::{
    plain_text, Block, BlockKind, BlockType, Database, DatabaseSource, DateRange, NodeKind, Page,
    PropertyField, PropertyValue, RelationRef, RichTextItem, SelectOption, TextContent, User,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId};

// --- API Client ---
pub use crate::api::{
    classify,
    client::ApiResponse,
    list_pages,
    parser::{
        parse_api_response, parse_blocks_pagination, parse_database_response, parse_error,
        parse_page_response, parse_pages_pagination,
    },
    NotionHttpClient, NotionRepository, PageSummary, PaginatedResponse, Pager,
};

// --- Formatting ---
pub use crate::formatting::{block_text, render_property};

// --- Crawl ---
pub use crate::crawl::{harvest, CrawlStats, Crawler, HarvestReport, NodeOutcome};
pub use crate::output::{
    BufferedSink, MemorySink, OutputLine, OutputReport, OutputSink, WriteThroughSink,
};
pub use crate::state::ProcessedSet;
