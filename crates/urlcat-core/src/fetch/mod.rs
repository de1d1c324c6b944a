//! One blocking HTTP GET per URL.
//!
//! Uses the curl crate (libcurl) for connection handling, redirects and TLS.
//! The whole response body is collected in memory before anything is written
//! to the output artifact, so a failed transfer leaves no partial item behind.

mod error;

pub use error::{classify_curl_error, FailureKind, FetchError};

use std::time::Duration;

/// Default total per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// libcurl treats a zero timeout as "wait forever"; never hand it one.
const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Fetches the raw body of a URL. The pipeline only depends on this trait so
/// tests can script responses without a network.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Request knobs for [`CurlFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound on the whole transfer (connect + headers + body).
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirections: 10,
            user_agent: None,
        }
    }
}

/// libcurl-backed fetcher. A fresh `Easy` handle per request keeps items independent.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    /// Timeouts below one second are raised to one second.
    pub fn new(mut opts: FetchOptions) -> Self {
        opts.timeout = opts.timeout.max(MIN_TIMEOUT);
        opts.connect_timeout = opts.connect_timeout.max(MIN_TIMEOUT);
        Self { opts }
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        easy.connect_timeout(self.opts.connect_timeout.min(self.opts.timeout))?;
        easy.timeout(self.opts.timeout)?;
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        tracing::trace!(url, status = code, bytes = body.len(), "GET complete");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_thirty_second_timeout() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert!(opts.connect_timeout <= opts.timeout);
        assert_eq!(opts.max_redirections, 10);
    }

    #[test]
    fn zero_timeouts_are_raised_to_minimum() {
        let fetcher = CurlFetcher::new(FetchOptions {
            timeout: Duration::ZERO,
            connect_timeout: Duration::ZERO,
            ..FetchOptions::default()
        });
        assert_eq!(fetcher.opts.timeout, Duration::from_secs(1));
        assert_eq!(fetcher.opts.connect_timeout, Duration::from_secs(1));
    }

    #[test]
    fn nonzero_timeouts_kept() {
        let fetcher = CurlFetcher::new(FetchOptions {
            timeout: Duration::from_secs(7),
            connect_timeout: Duration::from_secs(2),
            ..FetchOptions::default()
        });
        assert_eq!(fetcher.opts.timeout, Duration::from_secs(7));
        assert_eq!(fetcher.opts.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn unsupported_scheme_is_transport_error() {
        let fetcher = CurlFetcher::default();
        let err = fetcher.fetch("nosuchscheme://example.invalid/x").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
