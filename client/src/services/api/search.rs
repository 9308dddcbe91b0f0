//! # Search Endpoint

use shared::{SearchRequest, SearchResponse, WebSource};

use super::client::ApiClient;
use crate::core::error::Result;

/// Run a batch of web searches through the relay.
#[tracing::instrument(skip(client), fields(queries = queries.len()))]
pub async fn search(client: &ApiClient, queries: &[String]) -> Result<Vec<WebSource>> {
    let request = SearchRequest::new(queries.iter().cloned());
    let response: SearchResponse = client
        .post_json("/api/search", &request, "Search failed")
        .await?;

    tracing::debug!(sources = response.sources.len(), "Search batch returned");
    Ok(response.sources)
}
