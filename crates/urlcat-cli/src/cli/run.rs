//! `urlcat [INPUT] [OUTPUT]` – run the fetch-and-concatenate pipeline.

use anyhow::Result;
use std::io;
use urlcat_core::checksum;
use urlcat_core::config::UrlcatConfig;
use urlcat_core::fetch::CurlFetcher;
use urlcat_core::pipeline::{self, RunOptions};

pub fn run_pipeline(cfg: &UrlcatConfig, digest: bool) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.fetch_options());
    let opts = RunOptions {
        failures_path: cfg.failures_path.clone(),
    };

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let summary = pipeline::run(
        &cfg.input_path,
        &cfg.output_path,
        &fetcher,
        &opts,
        &mut console,
    )?;
    drop(console);

    if !summary.all_succeeded() {
        tracing::info!(
            "{} of {} URL(s) failed",
            summary.failed.len(),
            summary.total
        );
    }
    if let Some(path) = &cfg.failures_path {
        println!("Failure manifest saved to: {}", path.display());
    }
    if digest {
        println!("{}", checksum::digest_line(&summary.output_path)?);
    }
    Ok(())
}
