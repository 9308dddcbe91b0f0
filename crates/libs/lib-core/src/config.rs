//! # Application Configuration
//!
//! Relay configuration loaded from environment variables (optionally seeded from a
//! `.env` file via `dotenvy`).
//!
//! Vendor credentials are optional at startup: a relay whose credentials are absent
//! still serves requests, but every call to it fails fast with
//! [`AppError::ConfigurationMissing`] instead of reaching the vendor.
//!
//! | Variable | Default |
//! |---|---|
//! | `ANTHROPIC_API_KEY` | unset |
//! | `ANTHROPIC_API_BASE` | `https://api.anthropic.com` |
//! | `ANTHROPIC_MODEL` | `claude-sonnet-4-20250514` |
//! | `CHAT_MAX_TOKENS` | `1500` |
//! | `SEARCH_MAX_TOKENS` | `1000` |
//! | `KLING_ACCESS_KEY` / `KLING_SECRET_KEY` | unset |
//! | `KLING_API_ENDPOINT` | `https://api.klingai.com/v1` |

use std::env;

use crate::error::AppError;

pub const DEFAULT_ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_KLING_API_ENDPOINT: &str = "https://api.klingai.com/v1";
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_SEARCH_MAX_TOKENS: u32 = 1000;

/// Access/secret key pair for the video vendor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KlingCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Key for the text-generation and search vendor
    pub anthropic_api_key: Option<String>,

    /// Base URL of the text-generation vendor (without `/v1/messages`)
    pub anthropic_api_base: String,

    /// Model used by both the chat and the search relay
    pub anthropic_model: String,

    /// Output cap for chat replies
    pub chat_max_tokens: u32,

    /// Output cap for each search query
    pub search_max_tokens: u32,

    /// Video vendor key pair; both halves must be present
    pub kling_access_key: Option<String>,
    pub kling_secret_key: Option<String>,

    /// Base URL of the video vendor API
    pub kling_api_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_api_base: DEFAULT_ANTHROPIC_API_BASE.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            chat_max_tokens: DEFAULT_CHAT_MAX_TOKENS,
            search_max_tokens: DEFAULT_SEARCH_MAX_TOKENS,
            kling_access_key: None,
            kling_secret_key: None,
            kling_api_endpoint: DEFAULT_KLING_API_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and then read the process environment.
    pub fn load() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let parse_u32 = |key: &str, default: u32| -> Result<u32, String> {
            match non_empty(key) {
                Some(raw) => raw
                    .parse()
                    .map_err(|e| format!("{} must be a valid number: {}", key, e)),
                None => Ok(default),
            }
        };

        Ok(Self {
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            anthropic_api_base: non_empty("ANTHROPIC_API_BASE")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_API_BASE.to_string()),
            anthropic_model: non_empty("ANTHROPIC_MODEL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
            chat_max_tokens: parse_u32("CHAT_MAX_TOKENS", DEFAULT_CHAT_MAX_TOKENS)?,
            search_max_tokens: parse_u32("SEARCH_MAX_TOKENS", DEFAULT_SEARCH_MAX_TOKENS)?,
            kling_access_key: non_empty("KLING_ACCESS_KEY"),
            kling_secret_key: non_empty("KLING_SECRET_KEY"),
            kling_api_endpoint: non_empty("KLING_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_KLING_API_ENDPOINT.to_string()),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("ANTHROPIC_API_BASE", &self.anthropic_api_base),
            ("KLING_API_ENDPOINT", &self.kling_api_endpoint),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, value));
            }
        }

        for (name, value) in [
            ("CHAT_MAX_TOKENS", self.chat_max_tokens),
            ("SEARCH_MAX_TOKENS", self.search_max_tokens),
        ] {
            if value == 0 || value > 8192 {
                return Err(format!("{} must be between 1 and 8192", name));
            }
        }

        Ok(())
    }

    /// The text vendor key, or the "not configured" error.
    pub fn anthropic_key(&self) -> Result<&str, AppError> {
        self.anthropic_api_key.as_deref().ok_or_else(|| {
            AppError::ConfigurationMissing("ANTHROPIC_API_KEY not configured".to_string())
        })
    }

    /// The video vendor key pair, or the "not configured" error.
    pub fn kling_credentials(&self) -> Result<KlingCredentials, AppError> {
        match (&self.kling_access_key, &self.kling_secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(KlingCredentials {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            }),
            _ => Err(AppError::ConfigurationMissing(
                "Kling API credentials not configured".to_string(),
            )),
        }
    }
}
