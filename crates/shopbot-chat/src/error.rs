//! Error types for the conversational interface.
//!
//! A conversation turn never fails; these errors only come from the
//! integration edges (catalog access and session persistence).

use shopbot_core::error::ShopbotError;

/// Errors from the chat engine's integration surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<ShopbotError> for ChatError {
    fn from(err: ShopbotError) -> Self {
        ChatError::Catalog(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Snapshot(err.to_string())
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Persistence(err.to_string())
    }
}
