//! Outcome of a pipeline run.

use crate::fetch::FailureKind;
use std::path::PathBuf;

/// An item that was fetched and appended to the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSuccess {
    /// 1-based position in the input list.
    pub index: usize,
    pub url: String,
    /// Body length (separator and trailer not included).
    pub bytes: u64,
}

/// An item that was skipped because its fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub index: usize,
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: Vec<ItemSuccess>,
    pub failed: Vec<ItemFailure>,
    pub output_path: PathBuf,
    /// Total bytes in the artifact.
    pub bytes_written: u64,
}

impl RunSummary {
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failed.iter().map(|f| f.index).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
