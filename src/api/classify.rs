// src/api/classify.rs
//! Working out what an opaque id refers to.

use super::NotionRepository;
use crate::model::NodeKind;
use crate::types::NotionId;

/// Asks the API what `id` is.
///
/// The database endpoint is tried first. Only a "not found" or "validation"
/// answer says anything about the id's kind, so only those fall through to
/// the page endpoint; any other failure yields [`NodeKind::Unknown`].
/// Performs no caching and touches no crawl state.
pub async fn classify(repo: &dyn NotionRepository, id: &NotionId) -> NodeKind {
    match repo.retrieve_database(id).await {
        Ok(db) if db.is_linked() => NodeKind::LinkedDatabase,
        Ok(_) => NodeKind::Database,
        Err(e) if e.suggests_other_kind() => match repo.retrieve_page(id).await {
            Ok(_) => NodeKind::Page,
            Err(e) => {
                log::debug!("{} is neither a database nor a readable page: {}", id, e);
                NodeKind::Unknown
            }
        },
        Err(e) => {
            log::debug!("Could not classify {}: {}", id, e);
            NodeKind::Unknown
        }
    }
}
