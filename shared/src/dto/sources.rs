//! # Grounding Source Data Transfer Objects
//!
//! Uploaded documents, web sources, and the search relay request/response.

use serde::{Deserialize, Serialize};

/// Kind of an uploaded document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Pdf,
}

/// A user supplied document.
///
/// `content` holds raw text for [`DocumentKind::Text`] and base64 bytes for
/// [`DocumentKind::Pdf`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub content: String,
    #[serde(default)]
    pub size: u64,
}

impl Document {
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            kind: DocumentKind::Text,
            size: content.len() as u64,
            content,
        }
    }

    /// `size` is the size of the original file, not of the base64 payload.
    pub fn pdf(name: impl Into<String>, base64: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: DocumentKind::Pdf,
            content: base64.into(),
            size,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.kind == DocumentKind::Pdf
    }
}

/// A web page summary returned by the search relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebSource {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: String,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<String>>,
}

impl SearchRequest {
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: Some(queries.into_iter().map(Into::into).collect()),
        }
    }
}

/// Response of `POST /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub sources: Vec<WebSource>,
}
