//! # Kling HTTP Client

use lib_core::KlingCredentials;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::types::{task_id, CreateTaskRequest, TaskSnapshot};
use crate::error::VendorError;

/// Client for the video synthesis API.
#[derive(Clone)]
pub struct KlingClient {
    http: Client,
    endpoint: String,
    credentials: KlingCredentials,
}

impl KlingClient {
    pub fn new(http: Client, endpoint: impl Into<String>, credentials: KlingCredentials) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// `{endpoint}/videos/text2video[/{task_id}]`, with the task id escaped as a path segment.
    fn task_url(&self, task_id: Option<&str>) -> Result<Url, VendorError> {
        let invalid =
            || VendorError::NotConfigured(format!("Invalid KLING_API_ENDPOINT: {}", self.endpoint));

        let mut url = Url::parse(&self.endpoint).map_err(|_| invalid())?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty().extend(["videos", "text2video"]);
            if let Some(id) = task_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn error_text(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }

    async fn json_body(response: Response, context: &'static str) -> Result<Value, VendorError> {
        response.json().await.map_err(|e| VendorError::Decode {
            context,
            message: e.to_string(),
        })
    }

    /// Submit a generation task and return its id.
    pub async fn create_task(
        &self,
        prompt: &str,
        image_base64: &str,
    ) -> Result<String, VendorError> {
        let url = self.task_url(None)?;
        debug!(%url, prompt_chars = prompt.len(), "[KLING] create task");

        let response = self
            .http
            .post(url)
            .header("X-API-Key", &self.credentials.access_key)
            .header("X-API-Secret", &self.credentials.secret_key)
            .json(&CreateTaskRequest::new(prompt, image_base64))
            .send()
            .await
            .map_err(|source| VendorError::Transport {
                context: "Kling API request failed",
                source,
            })?;

        if !response.status().is_success() {
            let text = Self::error_text(response).await;
            return Err(VendorError::Rejected(format!("Kling API error: {}", text)));
        }

        let body = Self::json_body(response, "Kling create reply was not JSON").await?;
        task_id(&body).ok_or(VendorError::MissingTaskId)
    }

    /// Read the current state of a task.
    pub async fn task_status(&self, task_id: &str) -> Result<TaskSnapshot, VendorError> {
        let url = self.task_url(Some(task_id))?;
        debug!(%url, "[KLING] check task");

        let response = self
            .http
            .get(url)
            .header("X-API-Key", &self.credentials.access_key)
            .header("X-API-Secret", &self.credentials.secret_key)
            .send()
            .await
            .map_err(|source| VendorError::Transport {
                context: "Kling status request failed",
                source,
            })?;

        if !response.status().is_success() {
            let text = Self::error_text(response).await;
            return Err(VendorError::Rejected(format!("Kling status check error: {}", text)));
        }

        let body = Self::json_body(response, "Kling status reply was not JSON").await?;
        Ok(TaskSnapshot::from_body(&body))
    }
}
