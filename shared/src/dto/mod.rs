//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged between the session client
//! and the relay server.
//!
//! ## Module Organization
//!
//! - [`chat`] - Conversation messages and the chat relay request body
//! - [`sources`] - Documents, web sources and the search relay contract
//! - [`video`] - Video relay actions and status payloads
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase via `#[serde(rename_all = "camelCase")]`
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//! - **Errors**: Every relay failure is `{"error": "<message>"}` ([`ErrorResponse`])
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/video
//! Content-Type: application/json
//!
//! { "action": "check", "taskId": "task-123" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "status": "processing", "videoUrl": null, "progress": 40 }
//! ```

pub mod chat;
pub mod sources;
pub mod video;

pub use chat::*;
pub use sources::*;
pub use video::*;

use serde::{Deserialize, Serialize};

/// Uniform error body returned by every relay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
