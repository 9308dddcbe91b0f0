//! # Web Library
//!
//! The relay server: HTTP handlers, relay services, middleware and server startup.
//!
//! ## Endpoints
//!
//! | Method | Path | Relay |
//! |---|---|---|
//! | `POST` | `/api/chat` | chat: history + grounding prompt + PDFs to the text vendor |
//! | `POST` | `/api/search` | search: one vendor web search per query, merged sources |
//! | `POST` | `/api/video` | video: `create` a task or `check` its status |
//! | `GET` | `/health` | liveness |
//!
//! ```text
//! curl -X POST http://127.0.0.1:3001/api/search \
//!      -H 'content-type: application/json' \
//!      -d '{"queries": ["rust async runtimes"]}'
//! ```

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, start_server, AppState, ServerConfig};
