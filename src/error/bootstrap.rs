//! Reasons a tracking session does not start.

use thiserror::Error;

/// Missing or unusable bootstrap data.
///
/// None of these are user-facing: a session that fails to bootstrap simply
/// does no tracking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    /// The reader root container is not in the document.
    #[error("Reader root '{id}' not found")]
    MissingRoot { id: String },

    /// A required identifier attribute is absent.
    #[error("Missing attribute '{name}' on reader root")]
    MissingAttribute { name: &'static str },

    /// A required identifier attribute is not a positive integer.
    #[error("Invalid value '{value}' for attribute '{name}'")]
    InvalidAttribute { name: &'static str, value: String },

    /// The root holds no page elements.
    #[error("No page elements under reader root")]
    NoPages,
}

impl BootstrapError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BootstrapError::MissingRoot { .. } => "E_BOOT_ROOT",
            BootstrapError::MissingAttribute { .. } => "E_BOOT_ATTR_MISSING",
            BootstrapError::InvalidAttribute { .. } => "E_BOOT_ATTR_INVALID",
            BootstrapError::NoPages => "E_BOOT_NO_PAGES",
        }
    }
}
