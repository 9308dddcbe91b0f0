//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the session client and the relay server.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::chat`]**: Conversation messages and the chat relay request
//!   - **[`dto::sources`]**: Uploaded documents, web sources and the search relay contract
//!   - **[`dto::video`]**: Video relay actions and task status
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::strip_data_url`]**: Strip the `data:...;base64,` prefix from a data URL
//!   - **[`utils::format_size`]**: Human readable byte sizes
//!
//! ## Wire Format
//!
//! Field names follow the browser-facing contract, which is **camelCase**
//! (`systemPrompt`, `imageBase64`, `taskId`, `videoUrl`). A document's kind travels
//! as `"type"`.
//!
//! ## Usage in the Relay
//!
//! ```rust,ignore
//! use shared::dto::sources::{SearchRequest, SearchResponse};
//! use axum::Json;
//!
//! async fn search(Json(request): Json<SearchRequest>) -> Json<SearchResponse> {
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in the Client
//!
//! ```rust,ignore
//! use shared::dto::video::{VideoRequest, CreateVideoResponse};
//!
//! let request = VideoRequest::create("Hello", image_base64);
//!
//! let response: CreateVideoResponse = reqwest::Client::new()
//!     .post("http://localhost:3001/api/video")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
