//! # Client Error Types
//!
//! One error type for everything the client can run into.
//!
//! ## Error Categories
//!
//! - **Api**: the relay could not be reached or answered with something unreadable
//! - **Relay**: the relay answered with its `{"error": ...}` body
//! - **StatusCheck**: a status read failed while polling a video task
//! - **TaskFailed / TaskTimedOut / Cancelled**: terminal video job outcomes other than success
//! - **Validation**: a session action that is not allowed in the current state
//! - **Io**: reading a local file
//!
//! Chat failures never surface as `Err`: [`Session::send`](crate::app::Session::send)
//! records them in the conversation as `Error: <message>` using this type's `Display`.

use thiserror::Error;

/// Client-wide error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or an unreadable relay response.
    #[error("API error: {0}")]
    Api(String),

    /// Error message reported by the relay.
    #[error("{0}")]
    Relay(String),

    /// A status check failed mid-poll; polling stops.
    #[error("Status check failed: {0}")]
    StatusCheck(Box<ClientError>),

    #[error("Video generation failed")]
    TaskFailed,

    #[error("Video generation timed out")]
    TaskTimedOut,

    #[error("Video generation cancelled")]
    Cancelled,

    /// Input validation error.
    ///
    /// ```rust
    /// use client::core::error::ClientError;
    ///
    /// let err = ClientError::Validation("No message at index 4".to_string());
    /// assert_eq!(err.to_string(), "Validation error: No message at index 4");
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Api(format!("Network error: {}", err))
    }
}
