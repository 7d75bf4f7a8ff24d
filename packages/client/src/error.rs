//! Error types for the session client.

use std::time::Duration;

use thiserror::Error;

/// Client-side failures, including errors reported by the room API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Room id or participant id missing; detected before any request
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// create-room on a live room id
    #[error("Room already exists: {0}")]
    AlreadyExists(String),

    /// Room never created, expired, or closed
    #[error("Room not found: {0}")]
    NotFound(String),

    /// The server rejected the request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The server failed unexpectedly
    #[error("Internal server error: {0}")]
    Internal(String),

    /// No response within the request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or decoding failure
    #[error("Transport error: {0}")]
    Transport(String),
}
