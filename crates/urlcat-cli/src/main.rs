use urlcat_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::default_log_path().and_then(|path| logging::init_logging(&path)) {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("urlcat error: {:#}", err);
        std::process::exit(1);
    }
}
