// tests/support/mod.rs
//! An in-memory workspace behind the `NotionRepository` trait.

#![allow(dead_code)]

use notion_harvest::{
    Block, BlockKind, Database, FetchError, NotionErrorCode, NotionId, NotionRepository, Page,
    PaginatedResponse, PropertyValue, RichTextItem, TextContent,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Deterministic ids: `id(1)` is `00000000-0000-0000-0000-000000000001`.
pub fn id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).expect("valid test id")
}

pub fn page(n: u32, title: &str) -> Page {
    Page::new(id(n)).with_property("title", PropertyValue::title(title))
}

pub fn paragraph(n: u32, text: &str) -> Block {
    Block::new(id(n), BlockKind::paragraph(text))
}

pub fn rich_paragraph(n: u32, parts: &[&str]) -> Block {
    Block::new(
        id(n),
        BlockKind::Paragraph(TextContent {
            rich_text: parts.iter().map(|p| RichTextItem::plain(*p)).collect(),
        }),
    )
}

pub fn child_page(n: u32, title: &str) -> Block {
    Block::new(
        id(n),
        BlockKind::ChildPage {
            title: title.to_string(),
        },
    )
}

pub fn child_database(n: u32, title: &str) -> Block {
    Block::new(
        id(n),
        BlockKind::ChildDatabase {
            title: title.to_string(),
        },
    )
}

pub fn not_found(what: &NotionId) -> FetchError {
    FetchError::NotFound {
        message: format!("Could not find object with ID: {}", what),
    }
}

pub fn restricted() -> FetchError {
    FetchError::RestrictedResource {
        message: "Integration has no access".to_string(),
    }
}

pub fn server_error() -> FetchError {
    FetchError::Server {
        status: 502,
        code: NotionErrorCode::HttpStatus(502),
        message: "bad gateway".to_string(),
    }
}

/// One listing: batches served in order, optionally failing at a batch.
#[derive(Clone)]
struct Listing<T> {
    batches: Vec<Vec<T>>,
    fail_at: Option<(usize, FetchError)>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            batches: Vec::new(),
            fail_at: None,
        }
    }
}

impl<T: Clone> Listing<T> {
    fn serve(&self, cursor: Option<String>) -> Result<PaginatedResponse<T>, FetchError> {
        let index = match cursor {
            None => 0,
            Some(c) => c.parse::<usize>().map_err(|_| FetchError::Validation {
                message: format!("bad cursor {}", c),
            })?,
        };
        if let Some((at, err)) = &self.fail_at {
            if *at == index {
                return Err(err.clone());
            }
        }
        let results = self.batches.get(index).cloned().unwrap_or_default();
        let next = if index + 1 < self.batches.len() {
            Some((index + 1).to_string())
        } else {
            None
        };
        Ok(PaginatedResponse::batch(results, next))
    }
}

/// A fake workspace. Ids not registered as a page or database answer
/// "not found", like Notion does for ids of the other kind.
#[derive(Default)]
pub struct FakeWorkspace {
    pages: HashMap<NotionId, Page>,
    databases: HashMap<NotionId, Database>,
    page_failures: HashMap<NotionId, FetchError>,
    database_failures: HashMap<NotionId, FetchError>,
    entries: HashMap<NotionId, Listing<Page>>,
    children: HashMap<NotionId, Listing<Block>>,
    search: Listing<Page>,
    /// Database lookups that fail a number of times before succeeding.
    flaky_databases: Mutex<HashMap<NotionId, (usize, FetchError)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.search.batches.push(vec![page.clone()]);
        self.pages.insert(page.id.clone(), page);
        self
    }

    pub fn with_database(mut self, n: u32, title: &str, entries: Vec<Page>) -> Self {
        self.databases.insert(id(n), Database::new(id(n), title));
        self.entries.insert(
            id(n),
            Listing {
                batches: vec![entries],
                fail_at: None,
            },
        );
        self
    }

    pub fn with_linked_database(mut self, n: u32) -> Self {
        self.databases.insert(id(n), Database::linked(id(n)));
        self
    }

    pub fn with_children(self, parent: u32, blocks: Vec<Block>) -> Self {
        self.with_paged_children(parent, vec![blocks])
    }

    pub fn with_paged_children(mut self, parent: u32, batches: Vec<Vec<Block>>) -> Self {
        self.children.insert(
            id(parent),
            Listing {
                batches,
                fail_at: None,
            },
        );
        self
    }

    /// Entries listed by a database, split into pages of results.
    pub fn with_paged_entries(mut self, database: u32, batches: Vec<Vec<Page>>) -> Self {
        self.entries.insert(
            id(database),
            Listing {
                batches,
                fail_at: None,
            },
        );
        self
    }

    pub fn failing_page(mut self, n: u32, err: FetchError) -> Self {
        self.page_failures.insert(id(n), err);
        self
    }

    pub fn failing_database(mut self, n: u32, err: FetchError) -> Self {
        self.database_failures.insert(id(n), err);
        self
    }

    /// The first `times` lookups of database `n` fail with `err`.
    pub fn flaky_database(self, n: u32, times: usize, err: FetchError) -> Self {
        self.flaky_databases
            .lock()
            .expect("flaky databases")
            .insert(id(n), (times, err));
        self
    }

    pub fn failing_search(mut self, at: usize, err: FetchError) -> Self {
        self.search.fail_at = Some((at, err));
        self
    }

    /// Makes the children listing of `parent` fail at batch `at`.
    pub fn failing_children(mut self, parent: u32, at: usize, err: FetchError) -> Self {
        self.children.entry(id(parent)).or_default().fail_at = Some((at, err));
        self
    }

    pub fn failing_entries(mut self, database: u32, at: usize, err: FetchError) -> Self {
        self.entries.entry(id(database)).or_default().fail_at = Some((at, err));
        self
    }

    /// Every call made so far, as `"<method> <id> <cursor>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("call log").push(call);
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeWorkspace {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, FetchError> {
        self.record(format!("retrieve_page {}", id));
        if let Some(err) = self.page_failures.get(id) {
            return Err(err.clone());
        }
        self.pages.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, FetchError> {
        self.record(format!("retrieve_database {}", id));
        if let Some(err) = self.database_failures.get(id) {
            return Err(err.clone());
        }
        if let Some((remaining, err)) = self.flaky_databases.lock().expect("flaky").get_mut(id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(err.clone());
            }
        }
        self.databases.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn query_database(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Page>, FetchError> {
        self.record(format!("query_database {} {:?}", id, cursor));
        match self.entries.get(id) {
            Some(listing) => listing.serve(cursor),
            None => Ok(PaginatedResponse::batch(Vec::new(), None)),
        }
    }

    async fn list_block_children(
        &self,
        id: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, FetchError> {
        self.record(format!("list_block_children {} {:?}", id, cursor));
        match self.children.get(id) {
            Some(listing) => listing.serve(cursor),
            None => Ok(PaginatedResponse::batch(Vec::new(), None)),
        }
    }

    async fn search_pages(
        &self,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Page>, FetchError> {
        self.record(format!("search_pages {:?}", cursor));
        self.search.serve(cursor)
    }
}
