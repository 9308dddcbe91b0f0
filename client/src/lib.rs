//! # Grounded Chat Client - Library Root
//!
//! Headless client for the grounded chat relay. A [`Session`](app::Session) owns the
//! uploaded documents, collected web sources and the conversation, and drives the relay
//! endpoints through a [`RelayService`](core::service::RelayService).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 client (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app::Session        - documents, sources, messages    │
//! │  app::context        - grounding system prompt         │
//! │  app::tasks::video   - video job poller                │
//! │  services::api       - relay HTTP client (reqwest)     │
//! └────────────────────────────────────────────────────────┘
//!                          │ HTTP
//!                          ▼
//!              ┌───────────────────────┐
//!              │  Relay server         │
//!              │  /api/chat            │
//!              │  /api/search          │
//!              │  /api/video           │
//!              └───────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: session state, context assembly, terminal commands, background tasks
//! - **core**: error type and the service trait used for dependency injection
//! - **services**: the HTTP implementation of that trait
//!
//! ## Example
//!
//! ```rust,no_run
//! use client::app::{Session, SessionSettings};
//! use client::services::api::ApiClient;
//!
//! # async fn run() -> client::core::error::Result<()> {
//! let relay = ApiClient::from_env();
//! let mut session = Session::new(SessionSettings::new("Jane Doe"));
//!
//! session.scrape_web(&relay, None).await?;
//! session.activate()?;
//! session.send(&relay, "What is her position on transit funding?").await;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod core;
pub mod services;
