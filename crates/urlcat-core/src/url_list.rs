//! Input URL list: a JSON array of strings read from a file.
//!
//! The list is decoded once, up front, before the output artifact is created,
//! so that a bad input file never leaves a half-written output behind.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Fatal problems with the input file. Any of these aborts the run before a
/// single request is made.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The file could not be read at all.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("{} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Valid JSON, but the top-level value is not an array.
    #[error("input file must contain a JSON array of URLs (found {found})")]
    NotAnArray { found: &'static str },
    /// An array element is not a string. `index` is 1-based.
    #[error("entry {index} must be a URL string (found {found})")]
    InvalidElement { index: usize, found: &'static str },
}

/// Reads `path` and decodes it into an ordered list of URLs.
pub fn load(path: &Path) -> Result<Vec<String>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let urls = parse(&text).map_err(|e| match e {
        ParseFailure::Json(source) => InputError::Malformed {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Input(e) => e,
    })?;
    tracing::debug!(path = %path.display(), count = urls.len(), "loaded URL list");
    Ok(urls)
}

enum ParseFailure {
    Json(serde_json::Error),
    Input(InputError),
}

fn parse(text: &str) -> Result<Vec<String>, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(ParseFailure::Json)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ParseFailure::Input(InputError::NotAnArray {
                found: json_type_name(&other),
            }))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(ParseFailure::Input(InputError::InvalidElement {
                index: i + 1,
                found: json_type_name(&other),
            })),
        })
        .collect()
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
