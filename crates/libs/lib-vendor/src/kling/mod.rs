//! # Kling Video Gateway
//!
//! Video synthesis is a queue-backed job: [`KlingClient::create_task`] submits a
//! prompt and reference image and returns the vendor task id, and
//! [`KlingClient::task_status`] reads the job state. Status reads have no side
//! effects and may be repeated freely.

// region: --- Modules
pub mod client;
pub mod types;
// endregion: --- Modules

pub use client::KlingClient;
pub use types::{CreateTaskRequest, TaskSnapshot};
