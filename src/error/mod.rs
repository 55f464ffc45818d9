//! Error types for readmark.
//!
//! Error handling is split by how far an error is allowed to travel:
//!
//! - [`BootstrapError`] explains why a tracking session did not start. Hosts
//!   log it at debug level and carry on without tracking.
//! - [`DeliveryError`] describes a failed progress send. It only ever reaches
//!   the log and the delivery event channel, never the caller of `report`.
//! - [`ReadmarkError`] covers the outer surfaces (document loading,
//!   configuration, the collector) where errors do propagate.
//!
//! # Example
//!
//! ```ignore
//! use readmark::error::{ReadmarkResult, ResultExt};
//!
//! fn load(path: &Path) -> ReadmarkResult<ReaderDocument> {
//!     ReaderDocument::from_path(path).context("loading reader document")
//! }
//! ```

mod bootstrap;
mod delivery;

pub use bootstrap::BootstrapError;
pub use delivery::DeliveryError;

use thiserror::Error;

/// Unified error type for the fallible outer surfaces of readmark.
#[derive(Debug, Error)]
pub enum ReadmarkError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem or socket error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapped error with a description of what was being attempted.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReadmarkError>,
    },
}

impl ReadmarkError {
    /// Short error code for structured logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReadmarkError::Config(_) => "E_CONFIG",
            ReadmarkError::Io(_) => "E_IO",
            ReadmarkError::Json(_) => "E_JSON",
            ReadmarkError::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Attach a description of the failed operation.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReadmarkError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Type alias for Results using [`ReadmarkError`].
pub type ReadmarkResult<T> = Result<T, ReadmarkError>;

/// Extension trait for adding context to fallible results.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, context: &str) -> ReadmarkResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ReadmarkError>,
{
    fn context(self, context: &str) -> ReadmarkResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
