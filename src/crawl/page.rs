// src/crawl/page.rs
//! Page processing: header, properties, then the block tree.

use super::{Crawler, NodeOutcome};
use crate::constants::DEPTH_STEP;
use crate::error::AppError;
use crate::formatting::render_property;
use crate::model::Page;
use crate::types::NotionId;
use futures::future::{FutureExt, LocalBoxFuture};

impl<'a> Crawler<'a> {
    /// Writes a page and everything under it, starting at `depth`.
    ///
    /// A page that cannot be fetched leaves an error marker and is still
    /// marked processed, so it is not retried by later runs.
    pub fn process_page<'s>(
        &'s mut self,
        id: &'s NotionId,
        depth: usize,
    ) -> LocalBoxFuture<'s, Result<NodeOutcome, AppError>> {
        async move {
            if self.is_processed(id) {
                log::debug!("Skipping already processed page: {}", id);
                self.stats.already_processed += 1;
                return Ok(NodeOutcome::AlreadyProcessed);
            }

            match self.repo.retrieve_page(id).await {
                Ok(page) => self.write_page(id, &page, depth).await,
                Err(e) => {
                    log::warn!("Error accessing page {}: {}", id, e);
                    self.emit_error_marker(
                        depth,
                        format!("[error accessing page {}: {}]", id, e),
                        &e,
                    )?;
                    self.mark(id);
                    Ok(NodeOutcome::ErrorMarked)
                }
            }
        }
        .boxed_local()
    }

    /// Like [`Crawler::process_page`], but a failed fetch records nothing
    /// and returns [`NodeOutcome::Unreachable`].
    pub(crate) async fn try_process_page(
        &mut self,
        id: &NotionId,
        depth: usize,
    ) -> Result<NodeOutcome, AppError> {
        if self.is_processed(id) {
            self.stats.already_processed += 1;
            return Ok(NodeOutcome::AlreadyProcessed);
        }

        match self.repo.retrieve_page(id).await {
            Ok(page) => self.write_page(id, &page, depth).await,
            Err(e) => {
                log::info!("{} is not readable as a page: {}", id, e);
                Ok(NodeOutcome::Unreachable)
            }
        }
    }

    async fn write_page(
        &mut self,
        id: &NotionId,
        page: &Page,
        depth: usize,
    ) -> Result<NodeOutcome, AppError> {
        let title = page.title();
        log::info!("Processing page: {} - {}", id, title);

        self.emit(depth, format!("# Page: {} (ID: {})", title, id))?;
        for (name, field) in &page.properties {
            let value = render_property(field);
            if !value.is_empty() {
                self.emit(depth, format!("{}: {}", name, value))?;
            }
        }
        self.stats.pages += 1;

        // Marked before descending, so a page reachable from its own
        // subtree is written once.
        self.mark(id);
        self.walk_children(id, depth + DEPTH_STEP).await?;
        Ok(NodeOutcome::Emitted)
    }
}
