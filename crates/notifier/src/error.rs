use serde::Serialize;
use thiserror::Error;

use shipdesk_common::config::CredentialError;

use crate::transport::TransportError;

/// Everything that can go wrong while talking to the Bot API.
///
/// The `Display` output of each variant is the operator-facing detail string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] CredentialError),

    #[error("Request timeout")]
    Timeout,

    #[error("Request error: {0}")]
    Transport(String),

    #[error("HTTP error {0}")]
    HttpStatus(u16),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<TransportError> for NotifyError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => NotifyError::Timeout,
            TransportError::Failed(detail) => NotifyError::Transport(detail),
        }
    }
}

/// Outcome of a dispatch or connection test. `detail` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub ok: bool,
    pub detail: String,
}

impl DispatchResult {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            detail: detail.into(),
        }
    }

    pub fn failure(err: &NotifyError) -> Self {
        Self {
            ok: false,
            detail: err.to_string(),
        }
    }
}

impl From<Result<String, NotifyError>> for DispatchResult {
    fn from(outcome: Result<String, NotifyError>) -> Self {
        match outcome {
            Ok(detail) => DispatchResult::success(detail),
            Err(err) => DispatchResult::failure(&err),
        }
    }
}
