//! # Video Relay Handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use lib_core::{Config, Result};
use shared::VideoRequest;

use crate::services::video::{relay_video, VideoReply};

/// `POST /api/video` - `{action: "create" | "check", ...}`
pub async fn video(
    State(config): State<Config>,
    State(http): State<reqwest::Client>,
    payload: std::result::Result<Json<VideoRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    let reply = match relay_video(&config, &http, request).await? {
        VideoReply::Created(created) => Json(created).into_response(),
        VideoReply::Status(status) => Json(status).into_response(),
    };
    Ok(reply)
}
