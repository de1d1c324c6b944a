//! Machine-readable failure manifest.
//!
//! The console transcript is the only failure record a plain run leaves; with
//! a manifest path configured, the pipeline also writes a JSON summary of
//! which items were skipped and why.

use crate::pipeline::RunSummary;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct FailureManifest<'a> {
    pub total: usize,
    pub succeeded: usize,
    pub output: String,
    pub failed: Vec<FailureEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FailureEntry<'a> {
    pub index: usize,
    pub url: &'a str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub error: &'a str,
}

impl<'a> FailureManifest<'a> {
    pub fn from_summary(summary: &'a RunSummary) -> Self {
        Self {
            total: summary.total,
            succeeded: summary.succeeded.len(),
            output: summary.output_path.display().to_string(),
            failed: summary
                .failed
                .iter()
                .map(|f| FailureEntry {
                    index: f.index,
                    url: &f.url,
                    kind: f.kind.label(),
                    status: f.kind.http_status(),
                    error: &f.message,
                })
                .collect(),
        }
    }
}

/// Write the manifest for `summary` to `path` as pretty JSON.
pub fn write_manifest(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let manifest = FailureManifest::from_summary(summary);
    let mut json = serde_json::to_vec_pretty(&manifest)?;
    json.push(b'\n');
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FailureKind;
    use crate::pipeline::{ItemFailure, ItemSuccess};
    use serde_json::Value;

    fn sample() -> RunSummary {
        RunSummary {
            total: 3,
            succeeded: vec![
                ItemSuccess { index: 1, url: "http://ok.test/a".into(), bytes: 1 },
                ItemSuccess { index: 3, url: "http://ok.test/c".into(), bytes: 1 },
            ],
            failed: vec![ItemFailure {
                index: 2,
                url: "http://fail.test/b".into(),
                kind: FailureKind::HttpStatus(404),
                message: "HTTP 404".into(),
            }],
            output_path: "combined_output.txt".into(),
            bytes_written: 0,
        }
    }

    #[test]
    fn manifest_lists_failed_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failures.json");
        write_manifest(&path, &sample()).unwrap();

        let v: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(v["total"], 3);
        assert_eq!(v["succeeded"], 2);
        assert_eq!(v["output"], "combined_output.txt");
        let failed = v["failed"].as_array().unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0]["index"], 2);
        assert_eq!(failed[0]["url"], "http://fail.test/b");
        assert_eq!(failed[0]["kind"], "http_status");
        assert_eq!(failed[0]["status"], 404);
        assert_eq!(failed[0]["error"], "HTTP 404");
    }

    #[test]
    fn manifest_omits_status_for_transport_failures() {
        let mut summary = sample();
        summary.failed[0].kind = FailureKind::Timeout;
        let v = serde_json::to_value(FailureManifest::from_summary(&summary)).unwrap();
        assert_eq!(v["failed"][0]["kind"], "timeout");
        assert!(v["failed"][0].get("status").is_none());
    }
}
