//! # Core Abstractions
//!
//! Error type and the service trait the session is written against.
//!
//! - **[`error`]**: client error type (`ClientError`, `Result<T>`)
//! - **[`service`]**: [`RelayService`], the seam between session logic and HTTP
//!
//! ## Dependency Injection
//!
//! Session operations take `&dyn RelayService`, so tests swap the HTTP client for a
//! scripted double:
//!
//! ```rust,ignore
//! use client::core::service::RelayService;
//!
//! // In production: the reqwest-backed client
//! let relay = client::services::api::ApiClient::from_env();
//! session.send(&relay, "hello").await;
//!
//! // In tests: any type implementing the trait
//! session.send(&ScriptedRelay::default(), "hello").await;
//! ```

pub mod error;
pub mod service;

pub use error::{ClientError, Result};
pub use service::RelayService;
