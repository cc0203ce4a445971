//! Error types for the resource-scout crate.
//!
//! All errors carry stable string messages suitable for display to users
//! and for programmatic matching in tests. Provider failures are recoverable
//! by design and are normally logged rather than propagated; the variants
//! here cover the cases that do reach a caller.

/// Errors that can occur while collecting, classifying, or exporting resources.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// An HTTP request to a search provider failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider response could not be parsed (HTML or JSON).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid collector configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A provider reported a failure that was not an HTTP or parse error.
    #[error("provider error: {0}")]
    Provider(String),

    /// Writing or reading an export file failed.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience type alias for resource-scout results.
pub type Result<T> = std::result::Result<T, ScoutError>;
