//! # Anthropic Messages Gateway
//!
//! Client for the text-generation vendor. Two uses:
//!
//! - **Chat**: forward a prepared [`MessagesRequest`] and hand back the raw JSON reply
//! - **Search**: ask the model to run its `web_search` tool and answer with a JSON
//!   array of sources, see [`search`]

// region: --- Modules
pub mod client;
pub mod search;
pub mod types;
// endregion: --- Modules

pub use client::AnthropicClient;
pub use search::{search_prompt, SOURCES_PER_REPLY};
pub use types::{MessagesRequest, ToolSpec};
