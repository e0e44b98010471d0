use std::path::PathBuf;

use serde::Serialize;

use crate::classify::Category;
use crate::fetch::Transport;

/// A candidate that could not be downloaded or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    /// Redacted source URL.
    pub href: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedItem {
    pub path: PathBuf,
    pub category: Category,
    pub transport: Transport,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub saved: Vec<SavedItem>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedItem>,
    /// Links the user's selection did not ask for.
    pub filtered: usize,
    /// Links without an href.
    pub discarded: usize,
    pub folders_created: usize,
    pub folders_existing: usize,
    /// Schedule PDFs stored or already present, for highlighting and
    /// calendar sync.
    pub schedule_files: Vec<PathBuf>,
    /// Listings or month pages that could not be read.
    pub page_errors: Vec<String>,
}

impl RunReport {
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.page_errors.is_empty()
    }
}
