// src/api/search.rs
//! Discovering which pages an integration can see.

use super::{NotionRepository, Pager};
use crate::error::FetchError;
use crate::types::NotionId;
use std::fmt;

/// One page as reported by search.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub id: NotionId,
    pub title: String,
    pub url: Option<String>,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.id, self.title)?;
        if let Some(url) = &self.url {
            write!(f, "  {}", url)?;
        }
        Ok(())
    }
}

/// Every page shared with the integration, in search order.
///
/// Stops at the first failed request; pages found before it are returned
/// alongside the error.
pub async fn list_pages(repo: &dyn NotionRepository) -> (Vec<PageSummary>, Option<FetchError>) {
    let pager = Pager::new(move |cursor| repo.search_pages(cursor));
    let (pages, error) = pager.collect_all().await;
    let summaries = pages
        .into_iter()
        .map(|page| PageSummary {
            title: page.title(),
            id: page.id,
            url: page.url,
        })
        .collect();
    (summaries, error)
}
