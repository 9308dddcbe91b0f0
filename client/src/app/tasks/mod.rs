//! # Async Tasks
//!
//! Long-running client work that outlives a single relay round trip.

pub mod video;

pub use video::{poll_until_terminal, JobOutcome, PollSettings};
