//! Error type shared by the configuration layer and the page adapters.
//!
//! Controllers never hand these to the page: a failed clipboard write or a
//! storage error is logged and turned into a visible state change instead.

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, InteractError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractError {
    #[error("invalid configuration: {details}")]
    Config { details: String },

    #[error("asynchronous clipboard is not available")]
    ClipboardUnavailable,

    #[error("clipboard write rejected: {details}")]
    ClipboardRejected { details: String },

    #[error("legacy copy command failed: {details}")]
    LegacyCopyFailed { details: String },

    #[error("preference storage failure: {details}")]
    Storage { details: String },

    #[error("missing page element: {what}")]
    MissingElement { what: String },
}

impl InteractError {
    pub(crate) fn config(details: impl Into<String>) -> Self {
        Self::Config {
            details: details.into(),
        }
    }
}
