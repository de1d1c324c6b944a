use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::{FetchOptions, DEFAULT_TIMEOUT_SECS};

/// Global configuration loaded from `~/.config/urlcat/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlcatConfig {
    /// Input file holding the JSON array of URLs.
    pub input_path: PathBuf,
    /// Combined output artifact.
    pub output_path: PathBuf,
    /// Total per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds (capped by `timeout_secs`).
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirections: u32,
    /// Optional `User-Agent` header; libcurl sends none by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Optional JSON failure manifest path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures_path: Option<PathBuf>,
}

impl Default for UrlcatConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("urls.txt"),
            output_path: PathBuf::from("combined_output.txt"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirections: 10,
            user_agent: None,
            failures_path: None,
        }
    }
}

impl UrlcatConfig {
    /// Reject values that would leave requests unbounded.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        if self.connect_timeout_secs == 0 {
            anyhow::bail!("connect_timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirections: self.max_redirections,
            user_agent: self.user_agent.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlcat")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlcatConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UrlcatConfig> {
    if !path.exists() {
        let default_cfg = UrlcatConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UrlcatConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
