// src/crawl/driver.rs
//! Entry points: crawling from a root id, and a whole harvest run with
//! state loading, output and persistence around it.

use super::{CrawlStats, Crawler, NodeOutcome};
use crate::api::{classify, NotionRepository};
use crate::config::HarvestConfig;
use crate::error::AppError;
use crate::model::NodeKind;
use crate::output::{BufferedSink, OutputReport, OutputSink, WriteThroughSink};
use crate::state::ProcessedSet;
use crate::types::NotionId;

/// Depth of the root node's header.
const ROOT_DEPTH: usize = 0;

impl<'a> Crawler<'a> {
    /// Crawls everything reachable from `root`.
    ///
    /// When the root cannot be classified it is tried as a page first and,
    /// if that leaves nothing behind, as a database.
    pub async fn run(&mut self, root: &NotionId) -> Result<NodeOutcome, AppError> {
        if self.is_processed(root) {
            log::info!("Root {} was processed by an earlier run", root);
            self.stats.already_processed += 1;
            return Ok(NodeOutcome::AlreadyProcessed);
        }

        let kind = classify(self.repo, root).await;
        log::info!("Root {} identified as {}", root, kind);

        match kind {
            NodeKind::Page => self.process_page(root, ROOT_DEPTH).await,
            NodeKind::Database | NodeKind::LinkedDatabase => {
                self.process_database(root, ROOT_DEPTH).await
            }
            NodeKind::Block(_) | NodeKind::Unknown => {
                log::warn!(
                    "Root {} type could not be determined with certainty; trying page first",
                    root
                );
                match self.try_process_page(root, ROOT_DEPTH).await? {
                    NodeOutcome::Unreachable => self.process_database(root, ROOT_DEPTH).await,
                    outcome => Ok(outcome),
                }
            }
        }
    }
}

/// Summary of one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub outcome: NodeOutcome,
    pub stats: CrawlStats,
    pub output: OutputReport,
    /// Size of the processed set after the run.
    pub processed_total: usize,
    /// Ids this run added to the processed set.
    pub newly_processed: usize,
}

/// Runs one crawl end to end.
///
/// The processed set is written back exactly once, even when the crawl
/// stops on a fatal error; the first error is then returned.
pub async fn harvest(
    repo: &dyn NotionRepository,
    config: &HarvestConfig,
) -> Result<HarvestReport, AppError> {
    let mut processed = if config.fresh {
        log::info!("Ignoring earlier crawl state");
        ProcessedSet::new()
    } else {
        ProcessedSet::load(&config.state_path)?
    };
    let processed_before = if config.fresh { 0 } else { processed.len() };

    let mut sink: Box<dyn OutputSink> = if config.write_through {
        Box::new(WriteThroughSink::create(
            &config.output_path,
            config.indent_unit,
            config.append,
        )?)
    } else {
        Box::new(BufferedSink::new(
            &config.output_path,
            config.indent_unit,
            config.append,
        ))
    };

    let (crawled, stats) = {
        let mut crawler = Crawler::new(repo, &mut processed, sink.as_mut());
        let crawled = crawler.run(&config.root).await;
        (crawled, crawler.into_stats())
    };

    log::info!(
        "Crawl finished: {} nodes and {} lines written",
        stats.nodes_emitted(),
        sink.lines_emitted()
    );
    let finished = sink.finish();
    let persisted = processed.persist(&config.state_path);

    let outcome = match crawled {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Err(finish_err) = &finished {
                log::error!("Could not finish output: {}", finish_err);
            }
            if let Err(persist_err) = &persisted {
                log::error!("Could not save crawl state: {}", persist_err);
            }
            return Err(e);
        }
    };
    let output = match finished {
        Ok(output) => output,
        Err(e) => {
            if let Err(persist_err) = &persisted {
                log::error!("Could not save crawl state: {}", persist_err);
            }
            return Err(e);
        }
    };
    persisted?;

    Ok(HarvestReport {
        outcome,
        stats,
        output,
        processed_total: processed.len(),
        newly_processed: processed.len().saturating_sub(processed_before),
    })
}
