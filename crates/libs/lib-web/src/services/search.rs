//! # Search Relay Service
//!
//! Each query is an independent vendor web search. A query that fails, or whose reply
//! holds no recoverable source list, contributes nothing; the batch itself only fails
//! when the relay is not configured.

use std::collections::HashSet;

use futures_util::stream::{self, StreamExt};
use lib_core::{AppError, Config, Result};
use lib_vendor::AnthropicClient;
use shared::WebSource;
use serde_json::Value;
use tracing::{info, warn};

/// Sources kept from a single query's reply.
pub const MAX_SOURCES_PER_QUERY: usize = 2;

/// Sources returned for a whole batch.
pub const MAX_SOURCES: usize = 10;

/// Vendor searches in flight at once.
pub const SEARCH_CONCURRENCY: usize = 4;

/// Merge per-query results, in query order.
///
/// Takes at most [`MAX_SOURCES_PER_QUERY`] from each query, keeps the first occurrence of
/// every url across the batch, and stops at [`MAX_SOURCES`].
pub fn aggregate_sources<I>(per_query: I) -> Vec<WebSource>
where
    I: IntoIterator<Item = Vec<WebSource>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for batch in per_query {
        for source in batch.into_iter().take(MAX_SOURCES_PER_QUERY) {
            if seen.insert(source.url.clone()) {
                merged.push(source);
            }
        }
    }

    merged.truncate(MAX_SOURCES);
    merged
}

async fn search_one(client: &AnthropicClient, config: &Config, query: &str) -> Vec<WebSource> {
    match client
        .search_sources(&config.anthropic_model, config.search_max_tokens, query)
        .await
    {
        Ok(Some(sources)) => sources,
        Ok(None) => {
            info!(query, "[SEARCH] Could not parse sources from query");
            Vec::new()
        }
        Err(e) => {
            warn!(query, error = %e, "[SEARCH] Search failed for query");
            Vec::new()
        }
    }
}

/// Accept only a JSON array; non-string items are searched by their JSON text.
fn parse_queries(queries: Option<&Value>) -> Result<Vec<String>> {
    match queries {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .map(|item| match item {
                Value::String(query) => query.clone(),
                other => other.to_string(),
            })
            .collect()),
        _ => Err(AppError::InvalidInput("Queries array is required".to_string())),
    }
}

/// Run every query and return the merged, deduplicated, capped source list.
///
/// `queries` is the raw `queries` field of the request body. The vendor key is checked
/// before the field is validated.
pub async fn relay_search(
    config: &Config,
    http: &reqwest::Client,
    queries: Option<&Value>,
) -> Result<Vec<WebSource>> {
    let api_key = config.anthropic_key()?;
    let queries = parse_queries(queries)?;

    info!(queries = queries.len(), "[SEARCH] Running web search batch");

    let client = AnthropicClient::new(http.clone(), &config.anthropic_api_base, api_key);
    let client = &client;

    // `buffered` yields in input order, so the merge sees queries in the order given.
    let per_query: Vec<Vec<WebSource>> = stream::iter(queries)
        .map(|query| async move { search_one(client, config, &query).await })
        .buffered(SEARCH_CONCURRENCY)
        .collect()
        .await;

    let sources = aggregate_sources(per_query);
    info!(sources = sources.len(), "[SEARCH] Batch complete");
    Ok(sources)
}
