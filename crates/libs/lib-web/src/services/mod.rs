//! # Relay Services
//!
//! Request marshaling between the public relay contract and the vendor gateways.
//! Handlers stay thin: they extract state and body, call one function here, and
//! render the result.
//!
//! - **[`chat`]**: builds the vendor request, inlines PDF attachments into the final turn
//! - **[`search`]**: fans queries out to the vendor and merges the source lists
//! - **[`video`]**: `create` / `check` actions against the video vendor

pub mod chat;
pub mod search;
pub mod video;
