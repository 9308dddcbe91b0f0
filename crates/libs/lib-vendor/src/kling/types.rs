//! # Kling Wire Types

use serde::Serialize;
use serde_json::Value;
use shared::{strip_data_url, VideoStatusResponse};

pub const VIDEO_MODEL: &str = "kling-v1";
pub const VIDEO_DURATION_SECS: u32 = 5;
pub const VIDEO_ASPECT_RATIO: &str = "16:9";

/// Body of `POST {endpoint}/videos/text2video`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub model: String,
    pub prompt: String,
    /// Reference image as a JPEG data URL.
    pub image: String,
    pub duration: u32,
    pub aspect_ratio: String,
}

impl CreateTaskRequest {
    /// `image_base64` may be bare base64 or already a data URL.
    pub fn new(prompt: impl Into<String>, image_base64: &str) -> Self {
        Self {
            model: VIDEO_MODEL.to_string(),
            prompt: prompt.into(),
            image: format!("data:image/jpeg;base64,{}", strip_data_url(image_base64)),
            duration: VIDEO_DURATION_SECS,
            aspect_ratio: VIDEO_ASPECT_RATIO.to_string(),
        }
    }
}

/// Look a field up at the top level, then under `data`.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name)
        .or_else(|| body.get("data").and_then(|data| data.get(name)))
        .filter(|v| !v.is_null())
}

/// Task id from a create reply; empty strings do not count.
pub fn task_id(body: &Value) -> Option<String> {
    match field(body, "task_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalized status read of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub status: String,
    pub video_url: Option<String>,
    pub progress: u32,
}

impl TaskSnapshot {
    /// Missing `video_url` becomes `None`, missing or non-numeric `progress` becomes 0.
    pub fn from_body(body: &Value) -> Self {
        let status = field(body, "status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let video_url = field(body, "video_url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        let progress = field(body, "progress")
            .and_then(|p| p.as_u64().or_else(|| p.as_f64().map(|f| f.max(0.0) as u64)))
            .map(|p| p.min(u32::MAX as u64) as u32)
            .unwrap_or(0);

        Self {
            status,
            video_url,
            progress,
        }
    }
}

impl From<TaskSnapshot> for VideoStatusResponse {
    fn from(snapshot: TaskSnapshot) -> Self {
        VideoStatusResponse {
            status: snapshot.status,
            video_url: snapshot.video_url,
            progress: snapshot.progress,
        }
    }
}
