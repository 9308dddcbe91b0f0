//! # Vendor Errors
//!
//! Failures raised while talking to a vendor gateway, and their mapping onto
//! [`AppError`].

use lib_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VendorError {
    /// Credentials for this vendor are absent.
    #[error("{0}")]
    NotConfigured(String),

    /// The request never produced an HTTP response.
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor answered with a non-2xx status. The message is ready for display.
    #[error("{0}")]
    Rejected(String),

    /// The vendor accepted a video task but returned no identifier.
    #[error("No task_id returned from Kling API")]
    MissingTaskId,

    /// A 2xx body that could not be decoded.
    #[error("{context}: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },
}

impl From<VendorError> for AppError {
    fn from(err: VendorError) -> Self {
        match err {
            VendorError::NotConfigured(msg) => AppError::ConfigurationMissing(msg),
            VendorError::Decode { .. } => AppError::Parse(err.to_string()),
            other => AppError::VendorTransport(other.to_string()),
        }
    }
}
