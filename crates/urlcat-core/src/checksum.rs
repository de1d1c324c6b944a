//! SHA-256 of the finished artifact, for comparing re-runs.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Lowercase hex SHA-256 of the file at `path`, streamed rather than loaded whole.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut f, &mut hasher).with_context(|| format!("read {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}

/// `sha256sum`-style line: `<hex>  <path>`.
pub fn digest_line(path: &Path) -> Result<String> {
    let digest = sha256_path(path)?;
    Ok(format!("{}  {}", digest, path.display()))
}
