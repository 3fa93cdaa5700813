//! Error types for ghscout.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions up to [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level startup/shell error
//!   - `ConfigError` - config file or credential problems
//!   - `LoggingError` - tracing subscriber initialization
//!   - [`FetchError`] - data source failures
//!   - [`ClipboardError`] - system clipboard failures
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! Fetch and selection errors are **non-fatal**: they are handled inside the
//! component that detects them and the display simply stays where it was.
//! Only startup errors (config, credentials, logging, terminal) reach `main`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or the access token is missing.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The data source could not be constructed.
    #[error("Data source error: {0}")]
    Source(#[from] FetchError),

    /// The clipboard rejected the copy.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function; this is fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures reported by a repository data source.
///
/// # Recovery Patterns
///
/// - **RateLimited**: transient. Retried with bounded backoff; once the
///   budget is exhausted it is handled like any other recoverable fetch error.
/// - **OutOfRange**: the provider has no page at that index. The page index
///   rolls back and the previous page stays on screen.
/// - **Http / Transport / Decode**: recoverable; the display does not advance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The provider is throttling requests.
    ///
    /// `attempts` is the number of requests made before giving up; a single
    /// provider response reports `1`.
    #[error("Rate limited by provider after {attempts} attempt(s)")]
    RateLimited {
        /// Requests made before giving up.
        attempts: u32,
    },

    /// The requested page lies beyond what the provider will serve.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghscout::model::FetchError;
    ///
    /// let err = FetchError::OutOfRange { page: 34 };
    /// assert!(err.to_string().contains("34"));
    /// ```
    #[error("Page {page} is out of range")]
    OutOfRange {
        /// Zero-based page index that was requested.
        page: u32,
    },

    /// Non-success HTTP status that is neither throttling nor out-of-range.
    #[error("Provider returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Provider message, possibly empty.
        message: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected JSON shape.
    #[error("Could not decode provider response: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for the transient throttling condition that warrants a retry.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    /// Short user-facing description for the status bar.
    pub fn short_reason(&self) -> String {
        match self {
            FetchError::RateLimited { .. } => "rate limited".to_string(),
            FetchError::OutOfRange { .. } => "no more pages".to_string(),
            FetchError::Http { status, .. } => format!("HTTP {status}"),
            FetchError::Transport(_) => "network error".to_string(),
            FetchError::Decode(_) => "unexpected response".to_string(),
        }
    }
}

/// A highlighted entry could not be mapped back to a repository.
///
/// Expected under races (a stale navigation event after the buffer was
/// replaced); swallowed by the detail synchronizer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing is highlighted.
    #[error("No entry is selected")]
    NoSelection,

    /// The highlighted index has no backing repository.
    #[error("Selected index {index} is outside the current page of {len} entries")]
    OutOfRange {
        /// Highlighted row.
        index: usize,
        /// Entries in the current page.
        len: usize,
    },
}

/// The system clipboard rejected an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_detected() {
        assert!(FetchError::RateLimited { attempts: 1 }.is_rate_limited());
        assert!(!FetchError::OutOfRange { page: 2 }.is_rate_limited());
        assert!(!FetchError::Transport("timeout".into()).is_rate_limited());
    }

    #[test]
    fn selection_out_of_range_message_names_index_and_len() {
        let msg = SelectionError::OutOfRange { index: 7, len: 3 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn fetch_error_converts_to_app_error() {
        fn fails() -> Result<(), AppError> {
            Err(FetchError::Decode("bad".into()))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(AppError::Source(FetchError::Decode(_)))));
    }

    #[test]
    fn short_reason_is_terse() {
        assert_eq!(
            FetchError::Http {
                status: 502,
                message: String::new()
            }
            .short_reason(),
            "HTTP 502"
        );
        assert_eq!(
            FetchError::OutOfRange { page: 3 }.short_reason(),
            "no more pages"
        );
    }
}
