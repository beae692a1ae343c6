// src/crawl/stats.rs
//! Counters for the end-of-run summary.

use std::fmt;

/// What one crawl did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages: usize,
    pub databases: usize,
    pub database_entries: usize,
    pub linked_databases_skipped: usize,
    pub text_lines: usize,
    pub error_markers: usize,
    /// Error markers caused by failures that might not recur on a later run.
    pub transient_failures: usize,
    pub already_processed: usize,
    pub unclassified_entries: usize,
    pub listing_requests: usize,
}

impl CrawlStats {
    /// Nodes that gained a header line this run.
    pub fn nodes_emitted(&self) -> usize {
        self.pages + self.databases
    }
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pages:                {}", self.pages)?;
        writeln!(f, "Databases:            {}", self.databases)?;
        writeln!(f, "Database entries:     {}", self.database_entries)?;
        writeln!(f, "Text lines:           {}", self.text_lines)?;
        writeln!(
            f,
            "Error markers:        {} ({} transient)",
            self.error_markers, self.transient_failures
        )?;
        writeln!(f, "Linked dbs skipped:   {}", self.linked_databases_skipped)?;
        writeln!(f, "Already processed:    {}", self.already_processed)?;
        writeln!(f, "Unclassified entries: {}", self.unclassified_entries)?;
        write!(f, "Listing requests:     {}", self.listing_requests)
    }
}
