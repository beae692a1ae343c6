// src/crawl/blocks.rs
//! Walking a block tree.

use super::Crawler;
use crate::api::{classify, Pager};
use crate::constants::DEPTH_STEP;
use crate::error::AppError;
use crate::formatting::block_text;
use crate::model::{Block, BlockKind, NodeKind};
use crate::types::NotionId;
use futures::future::{FutureExt, LocalBoxFuture};

impl<'a> Crawler<'a> {
    /// Writes the children of a page or block at `depth`.
    ///
    /// Child pages and child databases start at `depth` themselves; nested
    /// block children go one step deeper. Plain blocks are not tracked in
    /// the processed set. A failed listing writes an error marker and ends
    /// this listing only.
    pub fn walk_children<'s>(
        &'s mut self,
        parent: &'s NotionId,
        depth: usize,
    ) -> LocalBoxFuture<'s, Result<(), AppError>> {
        async move {
            let repo = self.repo;
            let mut pager = Pager::new(move |cursor| repo.list_block_children(parent, cursor));

            while let Some(batch) = pager.next_batch().await {
                self.stats.listing_requests += 1;
                match batch {
                    Ok(blocks) => {
                        for block in blocks {
                            self.visit_block(&block, depth).await?;
                        }
                    }
                    Err(e) => {
                        log::warn!("Error listing children of {}: {}", parent, e);
                        self.emit_error_marker(
                            depth,
                            format!("[error listing children of {}: {}]", parent, e),
                            &e,
                        )?;
                    }
                }
            }
            Ok(())
        }
        .boxed_local()
    }

    async fn visit_block(&mut self, block: &Block, depth: usize) -> Result<(), AppError> {
        match &block.kind {
            BlockKind::ChildPage { title } => {
                log::debug!("Discovered child page: {} - {}", block.id, title);
                if self.is_processed(&block.id) {
                    log::debug!("Skipping already processed child page: {}", block.id);
                    self.stats.already_processed += 1;
                    return Ok(());
                }
                // The declared block type and what the id resolves to can
                // disagree.
                match classify(self.repo, &block.id).await {
                    NodeKind::Database | NodeKind::LinkedDatabase => {
                        self.process_database(&block.id, depth).await?;
                    }
                    _ => {
                        self.process_page(&block.id, depth).await?;
                    }
                }
            }
            BlockKind::ChildDatabase { title } => {
                log::debug!("Discovered child database: {} - {}", block.id, title);
                self.process_database(&block.id, depth).await?;
            }
            kind => {
                log::trace!("Visiting {} {}", block.node_kind(), block.id);
                let text = block_text(kind);
                if !text.is_empty() {
                    self.emit(depth, text)?;
                    self.stats.text_lines += 1;
                }
                if block.has_children {
                    self.walk_children(&block.id, depth + DEPTH_STEP).await?;
                }
            }
        }
        Ok(())
    }
}
