//! # Relay API Client
//!
//! HTTP client for the relay server, split by endpoint.
//!
//! - **[`client`]**: [`ApiClient`] and the [`RelayService`](crate::core::service::RelayService) impl
//! - **[`chat`]**: `POST /api/chat`
//! - **[`search`]**: `POST /api/search`
//! - **[`video`]**: `POST /api/video` (create and check)

pub mod chat;
pub mod client;
pub mod search;
pub mod video;

pub use client::ApiClient;
