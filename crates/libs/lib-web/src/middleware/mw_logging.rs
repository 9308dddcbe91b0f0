//! # Request/Response Logging Middleware
//!
//! One line per request and one per response, correlated by request ID. Relay bodies
//! carry base64 PDFs and images, so bodies are never logged; only their declared
//! length is. Credential headers are redacted before the header dump at debug level.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, info, warn};

use super::mw_req_stamp::RequestStamp;

/// Headers whose values never reach the logs
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-api-secret",
    "x-auth-token",
];

/// Header name/value pairs with sensitive values replaced.
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower == *h) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

fn content_length(headers: &HeaderMap) -> usize {
    headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0)
}

/// Request/response logging middleware.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let stamp = req.extensions().get::<RequestStamp>().cloned();
    let request_id = stamp
        .as_ref()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let started = stamp.map(|s| s.received_at).unwrap_or_else(std::time::Instant::now);

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        body_bytes = content_length(req.headers()),
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(
        request_id = %request_id,
        headers = ?redacted_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = started.elapsed();
    let status = response.status();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            size_bytes = content_length(response.headers()),
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status.as_u16(),
            duration.as_millis()
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn credential_headers_are_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("sk-live"));
        headers.insert("X-API-Secret", HeaderValue::from_static("secret"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let logged = redacted_headers(&headers);
        assert!(logged.iter().all(|(_, v)| v != "sk-live" && v != "secret"));
        assert!(logged.contains(&("content-type".to_string(), "application/json".to_string())));
    }
}
