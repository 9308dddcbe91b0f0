//! # Request Stamping Middleware
//!
//! Gives every request an ID, stored in request extensions as [`RequestStamp`] and
//! echoed back in the `X-Request-ID` response header. A caller-supplied
//! `X-Request-ID` is kept so a client can correlate its own logs with the relay's.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied ID accepted as-is.
const MAX_INCOMING_ID_LEN: usize = 128;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Request identifier
    pub id: String,
    /// When the relay received the request
    pub received_at: Instant,
}

impl RequestStamp {
    fn from_request(req: &Request) -> Self {
        let incoming = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_INCOMING_ID_LEN);

        Self {
            id: incoming
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            received_at: Instant::now(),
        }
    }
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_request(&req);
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}
