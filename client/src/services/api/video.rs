//! # Video Endpoint
//!
//! Both actions share `POST /api/video`; the body's `action` picks one.

use shared::{CreateVideoResponse, VideoRequest, VideoStatusResponse};

use super::client::ApiClient;
use crate::core::error::Result;

/// Submit a video task.
pub async fn create_video(client: &ApiClient, text: &str, image_base64: &str) -> Result<String> {
    let request = VideoRequest::create(text, image_base64);
    let created: CreateVideoResponse = client
        .post_json("/api/video", &request, "Failed to create video task")
        .await?;

    tracing::info!(task_id = %created.task_id, "Video task created");
    Ok(created.task_id)
}

/// Read a video task's state once.
pub async fn check_video(client: &ApiClient, task_id: &str) -> Result<VideoStatusResponse> {
    let request = VideoRequest::check(task_id);
    client.post_json("/api/video", &request, "Status check failed").await
}
