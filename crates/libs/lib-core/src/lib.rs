//! # Core Library
//!
//! Configuration and the application-wide error type for the relay server.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, KlingCredentials};
pub use error::{AppError, Result};
