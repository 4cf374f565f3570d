//! Error types shared by the catalog, configuration and scene code.

use thiserror::Error;

/// Result type for solsim operations
pub(crate) type Result<T> = std::result::Result<T, SolsimError>;

#[derive(Error, Debug)]
pub(crate) enum SolsimError {
    #[error("unknown body: {0:?}")]
    UnknownBody(String),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SolsimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SolsimError::InvalidSetting { name, reason: reason.into() }
    }
}
