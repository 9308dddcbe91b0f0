//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by every
//! relay handler. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Response Shape
//!
//! Every error renders as `{"error": "<message>"}`. The status is always
//! `500 Internal Server Error`, except [`AppError::MethodNotAllowed`] which is
//! `405 Method Not Allowed`. Clients rely on the message text, not on the status,
//! to tell failures apart.
//!
//! ## Error Categories
//!
//! 1. **Configuration** - [`ConfigurationMissing`](AppError::ConfigurationMissing): a vendor
//!    credential is absent, the vendor was never called
//! 2. **Protocol** - [`MethodNotAllowed`](AppError::MethodNotAllowed),
//!    [`InvalidInput`](AppError::InvalidInput)
//! 3. **Vendor** - [`VendorTransport`](AppError::VendorTransport): non-2xx or unreachable
//!    vendor, message passed through; [`Parse`](AppError::Parse): vendor reply was not
//!    the expected JSON
//! 4. **Internal** - [`Internal`](AppError::Internal)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_task_id(task_id: Option<String>) -> Result<String> {
//!     task_id.ok_or_else(|| AppError::InvalidInput("taskId is required for check action".to_string()))
//! }
//!
//! assert!(require_task_id(None).is_err());
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all relay failure scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required vendor credential is absent.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The endpoint only accepts `POST`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The vendor answered with a non-2xx status or could not be reached.
    #[error("Vendor transport error: {0}")]
    VendorTransport(String),

    /// The vendor reply did not contain the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed or incomplete request body.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure inside the relay.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the `error` field of the response body.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::ConfigurationMissing(msg)
            | AppError::VendorTransport(msg)
            | AppError::Parse(msg)
            | AppError::InvalidInput(msg) => msg.clone(),
            AppError::Internal(msg) if msg.is_empty() => "Internal server error".to_string(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::MethodNotAllowed | AppError::InvalidInput(_) => {
                tracing::debug!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Server error: {}", self);
            }
        }

        let body = Json(json!({ "error": self.user_message() }));
        (status, body).into_response()
    }
}

/// A body that failed to parse as the expected JSON.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}
