//! Per-item fetch error and its classification for logs and the failure manifest.

use std::fmt;

/// Error from a single GET. Never fatal to the run; the pipeline logs it and
/// moves on to the next URL.
#[derive(Debug)]
pub enum FetchError {
    /// libcurl reported a transport failure (DNS, connect, TLS, timeout, ...).
    Transport(curl::Error),
    /// The server answered with a status outside 2xx, or with none (0).
    Http(u32),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport(e) => classify_curl_error(e),
            FetchError::Http(code) => FailureKind::HttpStatus(u16::try_from(*code).unwrap_or(0)),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "{}", e),
            // libcurl reports 0 when no status line was received (non-HTTP schemes).
            FetchError::Http(0) => write!(f, "no HTTP status received"),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Transport(e)
    }
}

/// Coarse category of a per-item failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect or total timeout elapsed.
    Timeout,
    /// Network-level failure (refused, reset, DNS, ...).
    Connection,
    /// Server returned a client or server error status.
    HttpStatus(u16),
    /// Anything else curl reports (bad URL, TLS, ...).
    Other,
}

impl FailureKind {
    /// Stable lowercase label used in the failure manifest.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connection => "connection",
            FailureKind::HttpStatus(_) => "http_status",
            FailureKind::Other => "other",
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            FailureKind::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connection => write!(f, "connection"),
            FailureKind::HttpStatus(code) => write!(f, "http {}", code),
            FailureKind::Other => write!(f, "other"),
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}
