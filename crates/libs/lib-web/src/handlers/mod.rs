//! # HTTP Request Handlers
//!
//! One module per relay. Each handler extracts shared state and a JSON body, delegates
//! to [`crate::services`], and returns either JSON or an [`AppError`].
//!
//! - **[`chat`]**: `POST /api/chat`
//! - **[`search`]**: `POST /api/search`
//! - **[`video`]**: `POST /api/video`
//!
//! ## Error Handling
//!
//! Bodies are extracted as `Result<Json<T>, JsonRejection>` so a malformed body becomes
//! an [`AppError::InvalidInput`] and renders in the same `{"error": ...}` shape as every
//! other failure, rather than axum's plain-text rejection.
//!
//! Any method other than `POST` on a relay path reaches [`method_not_allowed`].

pub mod chat;
pub mod search;
pub mod video;

use lib_core::AppError;

/// Fallback for non-`POST` requests on relay routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
