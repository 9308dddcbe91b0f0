//! # API Client
//!
//! Main HTTP client for relay communication.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{ChatRelayRequest, ChatReply, ErrorResponse, VideoStatusResponse, WebSource};

use crate::core::error::{ClientError, Result};
use crate::core::service::RelayService;

/// Default relay server address.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3001";

/// Chat and search round trips include a vendor call, so allow them plenty of time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// HTTP client for communicating with the relay server.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the relay at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Relay address from `RELAY_URL`, falling back to [`DEFAULT_RELAY_URL`].
    pub fn from_env() -> Self {
        let base_url = std::env::var("RELAY_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
        Self::new(base_url)
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and decode a JSON reply.
    ///
    /// A non-success status becomes [`ClientError::Relay`] carrying the relay's
    /// `error` message, or `fallback` when the body is not the relay's error shape.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let start = std::time::Instant::now();

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!(error = %e, path, "Relay network error");
            ClientError::from(e)
        })?;

        let status = response.status();
        let duration = start.elapsed();

        if status.is_success() {
            tracing::debug!(path, duration_ms = duration.as_millis(), "Relay call succeeded");
            response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Api(format!("Failed to parse response: {}", e)))
        } else {
            tracing::warn!(
                path,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Relay call failed"
            );
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| fallback.to_string());
            Err(ClientError::Relay(message))
        }
    }
}

// Implement RelayService trait for ApiClient
#[async_trait::async_trait]
impl RelayService for ApiClient {
    async fn send_chat(&self, request: &ChatRelayRequest) -> Result<ChatReply> {
        crate::services::api::chat::send_chat(self, request).await
    }

    async fn search(&self, queries: &[String]) -> Result<Vec<WebSource>> {
        crate::services::api::search::search(self, queries).await
    }

    async fn create_video(&self, text: &str, image_base64: &str) -> Result<String> {
        crate::services::api::video::create_video(self, text, image_base64).await
    }

    async fn check_video(&self, task_id: &str) -> Result<VideoStatusResponse> {
        crate::services::api::video::check_video(self, task_id).await
    }
}
