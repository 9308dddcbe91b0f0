//! # External Services
//!
//! - **[`api`]**: HTTP client for the relay server
//!
//! Base URL comes from `RELAY_URL` (default `http://127.0.0.1:3001`).

pub mod api;
