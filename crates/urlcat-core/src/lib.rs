//! urlcat core: fetch an ordered list of URLs and concatenate the responses
//! into one artifact, one separator record per item.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod url_list;

pub use pipeline::{run, PipelineError, RunOptions, RunSummary};
