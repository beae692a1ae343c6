// src/crawl/mod.rs
//! The traversal engine: a pre-order, depth-first walk over pages,
//! databases and blocks.
//!
//! Three routines call each other: [`Crawler::process_page`],
//! [`Crawler::process_database`] and [`Crawler::walk_children`]. They run
//! strictly one request at a time. All crawl state travels in the
//! [`Crawler`] value rather than in globals.
//!
//! Remote failures never leave this module as errors. A node that cannot be
//! read becomes an inline error marker and counts as processed; a listing
//! that fails ends early. Only sink and state-file failures propagate, as
//! [`AppError`].

mod blocks;
mod database;
mod driver;
mod page;
mod stats;

pub use driver::{harvest, HarvestReport};
pub use stats::CrawlStats;

use crate::api::NotionRepository;
use crate::error::{AppError, ErrorClass, FetchError};
use crate::output::{OutputLine, OutputSink};
use crate::state::ProcessedSet;
use crate::types::NotionId;

/// How a page or database visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Header written and contents walked.
    Emitted,
    /// The node could not be read; an error marker was written instead.
    ErrorMarked,
    /// The node was in the processed set; nothing happened.
    AlreadyProcessed,
    /// A linked database view: marked processed, nothing written.
    LinkedSkipped,
    /// The page could not be read and nothing was recorded, so the caller
    /// may still try the id as something else.
    Unreachable,
}

/// The crawl context threaded through every processor call.
pub struct Crawler<'a> {
    repo: &'a dyn NotionRepository,
    processed: &'a mut ProcessedSet,
    sink: &'a mut dyn OutputSink,
    stats: CrawlStats,
}

impl<'a> Crawler<'a> {
    pub fn new(
        repo: &'a dyn NotionRepository,
        processed: &'a mut ProcessedSet,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            repo,
            processed,
            sink,
            stats: CrawlStats::default(),
        }
    }

    pub fn into_stats(self) -> CrawlStats {
        self.stats
    }

    fn emit(&mut self, depth: usize, text: impl Into<String>) -> Result<(), AppError> {
        self.sink.emit(OutputLine::new(depth, text))
    }

    fn emit_error_marker(
        &mut self,
        depth: usize,
        text: String,
        cause: &FetchError,
    ) -> Result<(), AppError> {
        self.stats.error_markers += 1;
        if cause.class() == ErrorClass::TransientListing {
            self.stats.transient_failures += 1;
        }
        self.emit(depth, text)
    }

    fn mark(&mut self, id: &NotionId) {
        self.processed.insert(id.clone());
    }

    fn is_processed(&self, id: &NotionId) -> bool {
        self.processed.contains(id)
    }
}
