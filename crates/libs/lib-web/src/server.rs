//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! The relay holds no per-user state: [`AppState`] is the configuration plus one
//! pooled outbound HTTP client, both cloned into every request.

// region: --- Imports
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use lib_core::Config;
use lib_vendor::{build_http_client, DEFAULT_VENDOR_TIMEOUT};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for reqwest::Client {
    fn from_ref(state: &AppState) -> Self {
        state.http.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Largest accepted request body. PDFs and reference images travel base64 encoded.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Request body limit in bytes
    pub body_limit_bytes: usize,
    /// Timeout for each vendor call
    pub vendor_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            vendor_timeout: DEFAULT_VENDOR_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma separated).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bind) = std::env::var("BIND_ADDRESS") {
            if !bind.trim().is_empty() {
                config.bind_address = bind.trim().to_string();
            }
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if !origins.is_empty() {
                config.allowed_origins = origins;
            }
        }
        config
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber. `LOG_LEVEL` picks the level (default `info`).
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" Log level: {}", log_level);
    Ok(())
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The outbound HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    info!(" GROUNDED CHAT RELAY STARTING");

    info!("Loading configuration...");
    let app_config = Config::load().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Missing credentials are not fatal: the affected relay answers "not configured".
    if app_config.anthropic_api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; /api/chat and /api/search will fail until it is");
    }
    if app_config.kling_credentials().is_err() {
        warn!("KLING_ACCESS_KEY / KLING_SECRET_KEY are not set; /api/video will fail until they are");
    }

    let http = build_http_client(config.vendor_timeout)?;
    let state = AppState {
        config: app_config,
        http,
    };

    let app = create_router(state, &config.allowed_origins, config.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the CORS layer for the browser front end.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static("x-request-id")])
        .expose_headers([header::HeaderName::from_static("x-request-id")])
}

/// Create the main application router with all routes
pub fn create_router(
    state: AppState,
    allowed_origins: &[String],
    body_limit_bytes: usize,
) -> Router {
    info!("[ROUTE SETUP] Registering HTTP routes...");

    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat::chat).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/search",
            post(handlers::search::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/video",
            post(handlers::video::video).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(
            // Outermost first: the stamp must exist before the trace span reads it.
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(stamp_req))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                        let request_id = request
                            .extensions()
                            .get::<RequestStamp>()
                            .map(|s| s.id.clone())
                            .unwrap_or_default();
                        tracing::info_span!(
                            "http_request",
                            request_id = %request_id,
                            method = %request.method(),
                            uri = %request.uri(),
                        )
                    }),
                )
                .layer(axum::middleware::from_fn(log_requests)),
        )
        .layer(cors_layer(allowed_origins))
}

/// Log server information
fn log_server_info() {
    info!(" RELAYS:");
    info!("   • POST /api/chat    {{messages, systemPrompt, documents}}");
    info!("   • POST /api/search  {{queries}}");
    info!("   • POST /api/video   {{action: create, text, imageBase64}} | {{action: check, taskId}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
