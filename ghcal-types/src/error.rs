use thiserror::Error;

/// Unified error type for the ghcal workspace.
///
/// Request and parse failures during year discovery are fatal to an
/// aggregation; the same failures inside a single window scrape are logged
/// and that window is omitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GhcalError {
    /// Building or sending an upstream request failed, or it returned a non-success status.
    #[error("request to {url} failed: {msg}")]
    Request {
        /// Target URL of the failed request.
        url: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Markup tokenization failed, or a date, level, or count value was malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Encoding the final report failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A single calendar window exceeded its deadline.
    #[error("window timed out: {label}")]
    WindowTimeout {
        /// Label of the window (e.g. "2022" or "last_year").
        label: String,
    },

    /// The overall aggregation exceeded its deadline.
    #[error("request timed out: {what}")]
    RequestTimeout {
        /// Description of the timed-out operation.
        what: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GhcalError {
    /// Helper: build a `Request` error for a URL and message.
    pub fn request(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Parse` error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(what: impl Into<String>) -> Self {
        Self::RequestTimeout { what: what.into() }
    }
}

impl From<serde_json::Error> for GhcalError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
