//! # Application Layer
//!
//! - **[`state`]**: [`Session`], the explicit conversation state and its operations
//! - **[`context`]**: grounding system prompt assembly
//! - **[`tasks`]**: the video job poller
//! - **[`command`]**: terminal line parsing

pub mod command;
pub mod context;
pub mod state;
pub mod tasks;

pub use command::Command;
pub use state::{ConversationMessage, Session, SessionSettings};
pub use tasks::{JobOutcome, PollSettings};
