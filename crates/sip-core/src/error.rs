//! Error types for SIP message handling

use thiserror::Error;

/// Result type for SIP message operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning raw bytes into a [`crate::Message`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The datagram carried no bytes at all
    #[error("empty message")]
    EmptyMessage,

    /// The start line does not carry the `SIP/2.0` version token
    #[error("invalid SIP message: {0}")]
    InvalidMessage(String),
}

impl Error {
    /// Create an invalid message error
    pub fn invalid_message(reason: impl Into<String>) -> Self {
        Self::InvalidMessage(reason.into())
    }
}
