//! # Anthropic HTTP Client
//!
//! Thin wrapper over `reqwest` that injects the API key and version headers and turns
//! non-2xx replies into [`VendorError::Rejected`].

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::types::{error_message, MessagesRequest};
use crate::error::VendorError;

/// API version header value the request shapes are written against.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(http: Client, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }

    /// Send one Messages API request and return the reply untouched.
    pub async fn messages(&self, request: &MessagesRequest) -> Result<Value, VendorError> {
        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            turns = request.messages.len(),
            tools = request.tools.len(),
            "[ANTHROPIC] POST /v1/messages"
        );

        let response = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|source| VendorError::Transport {
                context: "Anthropic request failed",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are JSON when the vendor produced them, anything when a proxy did.
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = error_message(&body).unwrap_or_else(|| "API request failed".to_string());
            debug!(status = status.as_u16(), %message, "[ANTHROPIC] request rejected");
            return Err(VendorError::Rejected(message));
        }

        response.json().await.map_err(|e| VendorError::Decode {
            context: "Anthropic reply was not JSON",
            message: e.to_string(),
        })
    }
}
