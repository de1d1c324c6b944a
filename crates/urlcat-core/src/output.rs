//! The combined output artifact.
//!
//! Layout per successfully fetched item `i`:
//!
//! ```text
//! \n\n===== FILE <i>: <url> =====\n\n<raw response bytes>\n\n
//! ```
//!
//! Items are appended in input order and flushed one at a time, so an
//! interrupted run leaves a prefix of complete items.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const TRAILER: &[u8] = b"\n\n";

/// Separator record written before item `index` (1-based).
pub fn separator(index: usize, url: &str) -> String {
    format!("\n\n===== FILE {}: {} =====\n\n", index, url)
}

/// Exclusive, append-only writer for the output artifact.
///
/// The file is flushed when the writer is dropped, including on early
/// return; call [`OutputWriter::finish`] to also sync it and surface errors.
pub struct OutputWriter {
    inner: BufWriter<File>,
    bytes_written: u64,
    items: usize,
}

impl OutputWriter {
    /// Create (or truncate) the artifact at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
            bytes_written: 0,
            items: 0,
        })
    }

    /// Append one item: separator, body verbatim, trailing blank line.
    pub fn append_item(&mut self, index: usize, url: &str, body: &[u8]) -> io::Result<()> {
        let header = separator(index, url);
        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(body)?;
        self.inner.write_all(TRAILER)?;
        self.inner.flush()?;
        self.bytes_written += (header.len() + body.len() + TRAILER.len()) as u64;
        self.items += 1;
        Ok(())
    }

    pub fn items(&self) -> usize {
        self.items
    }

    /// Flush, sync and close. Returns total bytes written.
    pub fn finish(self) -> io::Result<u64> {
        let bytes = self.bytes_written;
        let file = self.inner.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(bytes)
    }
}
