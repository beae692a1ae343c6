// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking listings.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// The API version pinned in every request.
pub const NOTION_VERSION: &str = "2022-06-28";

pub const API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Corpus layout
// ---------------------------------------------------------------------------

/// How much deeper a node's content sits than the node itself.
///
/// Block children and database entries are written this many depth units
/// below their parent.
pub const DEPTH_STEP: usize = 2;

/// Spaces written per depth unit unless configured otherwise.
pub const DEFAULT_INDENT_UNIT: usize = 1;

pub const UNTITLED_PAGE: &str = "(untitled)";
pub const UNTITLED_DATABASE: &str = "(untitled database)";

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

pub const DEFAULT_OUTPUT_PATH: &str = "data/notion_extracted.txt";
pub const DEFAULT_STATE_PATH: &str = "data/processed_ids.json";

/// Name of the debug log written to the system temp directory.
pub const LOG_FILE_NAME: &str = "notion-harvest.log";
