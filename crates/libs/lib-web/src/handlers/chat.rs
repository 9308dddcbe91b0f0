//! # Chat Relay Handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use lib_core::{Config, Result};
use serde_json::Value;
use shared::ChatRelayRequest;

use crate::services::chat::relay_chat;

/// `POST /api/chat` - returns the vendor payload as-is.
pub async fn chat(
    State(config): State<Config>,
    State(http): State<reqwest::Client>,
    payload: std::result::Result<Json<ChatRelayRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    let reply = relay_chat(&config, &http, request).await?;
    Ok(Json(reply))
}
