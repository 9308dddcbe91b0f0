//! # Video Relay Service
//!
//! Two actions over one endpoint. `create` submits a generation task; `check` is a
//! single read of task state and may be repeated without side effects. Driving a task
//! to completion is the caller's job (see the client's job poller).

use lib_core::{AppError, Config, Result};
use lib_vendor::KlingClient;
use shared::{CreateVideoResponse, VideoRequest, VideoStatusResponse, TaskStatus};
use tracing::{info, warn};

/// Outcome of one video relay call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoReply {
    Created(CreateVideoResponse),
    Status(VideoStatusResponse),
}

fn client(config: &Config, http: &reqwest::Client) -> Result<KlingClient> {
    let credentials = config.kling_credentials()?;
    Ok(KlingClient::new(http.clone(), &config.kling_api_endpoint, credentials))
}

/// Submit a generation task.
pub async fn create_video(
    config: &Config,
    http: &reqwest::Client,
    text: &str,
    image_base64: &str,
) -> Result<CreateVideoResponse> {
    let kling = client(config, http)?;
    let task_id = kling.create_task(text, image_base64).await?;
    info!(task_id = %task_id, "[VIDEO] Task created");
    Ok(CreateVideoResponse { task_id })
}

/// Read the current state of a task.
pub async fn check_video(
    config: &Config,
    http: &reqwest::Client,
    task_id: &str,
) -> Result<VideoStatusResponse> {
    let kling = client(config, http)?;
    let snapshot = kling.task_status(task_id).await?;

    let status: VideoStatusResponse = snapshot.into();
    if let TaskStatus::Unrecognized(raw) = status.task_status() {
        warn!(task_id, status = %raw, "[VIDEO] Unrecognized task status from vendor");
    }
    info!(task_id, status = %status.status, progress = status.progress, "[VIDEO] Task checked");
    Ok(status)
}

/// Dispatch a video relay request on its `action`.
///
/// Credentials are checked before the action so a misconfigured relay reports that
/// regardless of what was asked.
pub async fn relay_video(
    config: &Config,
    http: &reqwest::Client,
    request: VideoRequest,
) -> Result<VideoReply> {
    config.kling_credentials()?;

    match request.action.as_str() {
        "create" => {
            let (text, image) = match (request.text.as_deref(), request.image_base64.as_deref()) {
                (Some(text), Some(image)) if !image.is_empty() => (text, image),
                _ => {
                    return Err(AppError::InvalidInput(
                        "text and imageBase64 are required for create action".to_string(),
                    ))
                }
            };
            create_video(config, http, text, image).await.map(VideoReply::Created)
        }
        "check" => {
            let task_id = request
                .task_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    AppError::InvalidInput("taskId is required for check action".to_string())
                })?;
            check_video(config, http, task_id).await.map(VideoReply::Status)
        }
        _ => Err(AppError::InvalidInput(
            r#"Invalid action. Use "create" or "check""#.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        Config {
            kling_access_key: Some("ak".into()),
            kling_secret_key: Some("sk".into()),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn credentials_are_checked_before_the_action() {
        let err = relay_video(&Config::default(), &reqwest::Client::new(), VideoRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Kling API credentials not configured");
    }

    #[tokio::test]
    async fn unknown_action_is_described() {
        let request = VideoRequest {
            action: "delete".into(),
            ..Default::default()
        };
        let err = relay_video(&configured(), &reqwest::Client::new(), request).await.unwrap_err();
        assert_eq!(err.user_message(), r#"Invalid action. Use "create" or "check""#);
    }

    #[tokio::test]
    async fn check_requires_task_id() {
        let request = VideoRequest {
            action: "check".into(),
            ..Default::default()
        };
        let err = relay_video(&configured(), &reqwest::Client::new(), request).await.unwrap_err();
        assert_eq!(err.user_message(), "taskId is required for check action");
    }
}
