//! CLI for urlcat.

mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use urlcat_core::config::{self, UrlcatConfig};

use run::run_pipeline;

/// Download every URL listed in a JSON array and concatenate the responses into one file.
#[derive(Debug, Parser)]
#[command(name = "urlcat")]
#[command(about = "Fetch a JSON list of URLs and concatenate the responses", long_about = None)]
pub struct Cli {
    /// File holding a JSON array of URLs (default: urls.txt).
    pub input: Option<PathBuf>,

    /// Combined output file, truncated on start (default: combined_output.txt).
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds, at least 1 (default: 30).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Also write a JSON manifest of failed URLs to this path.
    #[arg(long, value_name = "PATH")]
    pub failures: Option<PathBuf>,

    /// Print the SHA-256 of the output file when done.
    #[arg(long)]
    pub digest: bool,

    /// Use this config file instead of ~/.config/urlcat/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let cfg = cli.apply(cfg);
        run_pipeline(&cfg, cli.digest)
    }

    /// An explicit `--config` must load; the default location is best-effort.
    fn load_config(&self) -> Result<UrlcatConfig> {
        if let Some(path) = &self.config {
            return config::load_or_init_at(path);
        }
        match config::load_or_init() {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                tracing::warn!("using default config: {:#}", err);
                Ok(UrlcatConfig::default())
            }
        }
    }

    /// Command-line values override the config file.
    pub fn apply(&self, mut cfg: UrlcatConfig) -> UrlcatConfig {
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            cfg.output_path = output.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        if let Some(path) = &self.failures {
            cfg.failures_path = Some(path.clone());
        }
        cfg
    }
}
