//! # Vendor Gateway Library
//!
//! HTTP clients for the third-party services the relays forward to:
//!
//! - **[`anthropic`]**: text generation (Messages API) and web search via the
//!   `web_search` server tool
//! - **[`kling`]**: video synthesis task creation and status reads
//! - **[`extract`]**: best-effort recovery of a JSON array from free-text model output
//!
//! Clients hold credentials handed to them by the relay layer; they never read the
//! environment themselves.

pub mod anthropic;
pub mod error;
pub mod extract;
pub mod kling;

use std::time::Duration;

pub use anthropic::AnthropicClient;
pub use error::VendorError;
pub use kling::KlingClient;

/// Default timeout for vendor calls. Model replies with large PDF inputs can be slow.
pub const DEFAULT_VENDOR_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the shared outbound HTTP client.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, VendorError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| VendorError::Transport {
            context: "Failed to build HTTP client",
            source,
        })
}
