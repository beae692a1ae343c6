// src/state.rs
//! The persisted ledger of nodes already written to the corpus.
//!
//! Ids only ever enter the set. It is read once when a run starts and
//! written back once when the run ends, which makes a later run skip
//! everything an earlier one finished.

use crate::error::AppError;
use crate::output::ensure_parent_dir;
use crate::types::NotionId;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSet {
    ids: BTreeSet<NotionId>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the state file. A missing file is an empty set.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No crawl state at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let ids: Vec<NotionId> =
            serde_json::from_str(&content).map_err(|source| AppError::StateFileCorrupt {
                path: path.to_path_buf(),
                source,
            })?;
        let set = Self {
            ids: ids.into_iter().collect(),
        };
        log::info!(
            "Loaded {} processed ids from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Overwrites the state file with every id in the set.
    pub fn persist(&self, path: &Path) -> Result<(), AppError> {
        ensure_parent_dir(path)?;
        let ids: Vec<&NotionId> = self.ids.iter().collect();
        let json = serde_json::to_string_pretty(&ids).map_err(|source| {
            AppError::StateFileCorrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved {} processed ids to {}", self.len(), path.display());
        Ok(())
    }

    pub fn contains(&self, id: &NotionId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if the id was not yet present.
    pub fn insert(&mut self, id: NotionId) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
