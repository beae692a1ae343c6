// src/crawl/database.rs
//! Database processing: header, then every entry through the query endpoint.

use super::{Crawler, NodeOutcome};
use crate::api::{classify, Pager};
use crate::constants::DEPTH_STEP;
use crate::error::AppError;
use crate::model::NodeKind;
use crate::types::NotionId;
use futures::future::{FutureExt, LocalBoxFuture};

impl<'a> Crawler<'a> {
    /// Writes a database and its entries, starting at `depth`.
    ///
    /// Linked database views are marked processed and skipped without
    /// output; their rows belong to the source database.
    pub fn process_database<'s>(
        &'s mut self,
        id: &'s NotionId,
        depth: usize,
    ) -> LocalBoxFuture<'s, Result<NodeOutcome, AppError>> {
        async move {
            if self.is_processed(id) {
                log::debug!("Skipping already processed database: {}", id);
                self.stats.already_processed += 1;
                return Ok(NodeOutcome::AlreadyProcessed);
            }

            let database = match self.repo.retrieve_database(id).await {
                Ok(database) => database,
                Err(e) => {
                    log::warn!("Error accessing database {}: {}", id, e);
                    self.emit_error_marker(
                        depth,
                        format!("[error accessing database {}: {}]", id, e),
                        &e,
                    )?;
                    self.mark(id);
                    return Ok(NodeOutcome::ErrorMarked);
                }
            };

            if database.is_linked() {
                log::info!("Skipping linked database: {}", id);
                self.stats.linked_databases_skipped += 1;
                self.mark(id);
                return Ok(NodeOutcome::LinkedSkipped);
            }

            let title = database.title();
            log::info!("Processing database: {} - {}", id, title);
            self.emit(depth, format!("# Database: {} (ID: {})", title, id))?;
            self.stats.databases += 1;
            self.mark(id);

            self.process_entries(id, depth).await?;
            Ok(NodeOutcome::Emitted)
        }
        .boxed_local()
    }

    async fn process_entries(&mut self, id: &NotionId, depth: usize) -> Result<(), AppError> {
        let repo = self.repo;
        let mut pager = Pager::new(move |cursor| repo.query_database(id, cursor));
        let mut seen = 0usize;

        while let Some(batch) = pager.next_batch().await {
            self.stats.listing_requests += 1;
            let entries = match batch {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Error querying database {}: {}", id, e);
                    self.emit_error_marker(
                        depth,
                        format!("[error querying database {}: {}]", id, e),
                        &e,
                    )?;
                    break;
                }
            };

            for entry in entries {
                seen += 1;
                self.stats.database_entries += 1;
                log::info!("Processed entry {}: {}", seen, entry.title());

                if self.is_processed(&entry.id) {
                    log::debug!("Skipping already processed entry: {}", entry.id);
                    self.stats.already_processed += 1;
                    continue;
                }

                // Entries are almost always pages, but the query result
                // alone does not prove it.
                match classify(repo, &entry.id).await {
                    NodeKind::Database | NodeKind::LinkedDatabase => {
                        self.process_database(&entry.id, depth + DEPTH_STEP).await?;
                    }
                    NodeKind::Page => {
                        self.process_page(&entry.id, depth + DEPTH_STEP).await?;
                    }
                    // The listing itself vouches for a page; let the page
                    // processor record why it cannot be read.
                    NodeKind::Unknown if entry.is_page_object() => {
                        log::debug!("Entry {} unclassified, listed as a page", entry.id);
                        self.process_page(&entry.id, depth + DEPTH_STEP).await?;
                    }
                    kind @ (NodeKind::Block(_) | NodeKind::Unknown) => {
                        log::warn!(
                            "Skipping entry {} of database {}: listed as {:?}, classified as {}",
                            entry.id,
                            id,
                            entry.object,
                            kind
                        );
                        self.stats.unclassified_entries += 1;
                    }
                }
            }
        }

        log::debug!(
            "Database {} listed {} entries in {} requests",
            id,
            seen,
            pager.batches_fetched()
        );
        Ok(())
    }
}
