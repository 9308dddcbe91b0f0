//! # Search Relay Handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use lib_core::{Config, Result};
use serde_json::Value;
use shared::SearchResponse;

use crate::services::search::relay_search;

/// `POST /api/search`
///
/// The body is taken as loose JSON so a wrongly typed `queries` field gets the relay's own
/// validation message instead of a deserialization error.
pub async fn search(
    State(config): State<Config>,
    State(http): State<reqwest::Client>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let Json(body) = payload?;
    let sources = relay_search(&config, &http, body.get("queries")).await?;
    Ok(Json(SearchResponse { sources }))
}
