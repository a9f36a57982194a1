//! Error types for overlay registration and value production

use thiserror::Error;

/// Errors while building the overlay registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("overlay label '{label}' is already registered")]
    DuplicateLabel { label: String },
}

/// A value producer failed to produce text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("value unavailable: {reason}")]
    Unavailable { reason: String },
}

impl OverlayError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
