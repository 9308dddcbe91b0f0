//! # Video Data Transfer Objects
//!
//! The video relay multiplexes two actions over one endpoint:
//!
//! ```text
//! { "action": "create", "text": "...", "imageBase64": "..." }  ->  { "taskId": "..." }
//! { "action": "check", "taskId": "..." }                        ->  { "status": "...", "videoUrl": null, "progress": 0 }
//! ```

use serde::{Deserialize, Serialize};

/// Body of `POST /api/video`.
///
/// The action stays a plain string so the relay can answer an unknown action with
/// its own message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl VideoRequest {
    pub fn create(text: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self {
            action: "create".to_string(),
            text: Some(text.into()),
            image_base64: Some(image_base64.into()),
            task_id: None,
        }
    }

    pub fn check(task_id: impl Into<String>) -> Self {
        Self {
            action: "check".to_string(),
            task_id: Some(task_id.into()),
            ..Default::default()
        }
    }
}

/// Response of the `create` action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoResponse {
    pub task_id: String,
}

/// Response of the `check` action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusResponse {
    pub status: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub progress: u32,
}

impl VideoStatusResponse {
    pub fn task_status(&self) -> TaskStatus {
        TaskStatus::from_wire(&self.status)
    }
}

/// Vendor status values that mean "still working".
const PENDING_STATUSES: &[&str] = &[
    "pending",
    "submitted",
    "queued",
    "processing",
    "running",
    "in_progress",
];

/// Classified vendor task status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
    /// A status string the relay does not know. Polling treats it as pending.
    Unrecognized(String),
}

impl TaskStatus {
    pub fn from_wire(status: &str) -> Self {
        let normalized = status.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "completed" => TaskStatus::Completed,
            "failed" => TaskStatus::Failed,
            s if PENDING_STATUSES.contains(&s) => TaskStatus::Pending,
            _ => TaskStatus::Unrecognized(status.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_request_omits_create_fields() {
        let json = serde_json::to_value(VideoRequest::check("abc")).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "check", "taskId": "abc" }));
    }

    #[test]
    fn status_defaults_missing_url_and_progress() {
        let status: VideoStatusResponse =
            serde_json::from_str(r#"{"status":"processing"}"#).unwrap();
        assert_eq!(status.video_url, None);
        assert_eq!(status.progress, 0);
        assert_eq!(status.task_status(), TaskStatus::Pending);
    }

    #[test]
    fn classifies_unknown_status_without_losing_it() {
        assert_eq!(TaskStatus::from_wire("COMPLETED"), TaskStatus::Completed);
        assert_eq!(TaskStatus::from_wire("failed"), TaskStatus::Failed);
        assert_eq!(
            TaskStatus::from_wire("archived"),
            TaskStatus::Unrecognized("archived".to_string())
        );
        assert!(!TaskStatus::from_wire("archived").is_terminal());
    }
}
