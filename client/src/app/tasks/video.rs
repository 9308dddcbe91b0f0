//! # Video Job Poller
//!
//! Drives a created video task to a terminal state by calling the relay's `check`
//! action on a fixed interval.
//!
//! ```text
//! loop while checks < max_attempts:
//!     sleep(interval)            (raced against the cancel token)
//!     check(task_id)             (transport failure ends the loop with Err)
//!     completed + videoUrl  -> Completed
//!     failed                -> Failed
//!     anything else         -> keep polling
//! -> TimedOut
//! ```
//!
//! The first check happens one interval after creation, never immediately. Once an
//! outcome is returned the task is never checked again.

use std::collections::HashSet;
use std::time::Duration;

use shared::TaskStatus;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::error::{ClientError, Result};
use crate::core::service::RelayService;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Poll cadence and attempt ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// How a polled job ended. `checks` counts status reads made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { video_url: String, checks: u32 },
    Failed { checks: u32 },
    TimedOut { checks: u32 },
    Cancelled { checks: u32 },
}

impl JobOutcome {
    pub fn checks(&self) -> u32 {
        match self {
            JobOutcome::Completed { checks, .. }
            | JobOutcome::Failed { checks }
            | JobOutcome::TimedOut { checks }
            | JobOutcome::Cancelled { checks } => *checks,
        }
    }

    /// The video url on success, otherwise the matching error.
    pub fn into_result(self) -> Result<String> {
        match self {
            JobOutcome::Completed { video_url, .. } => Ok(video_url),
            JobOutcome::Failed { .. } => Err(ClientError::TaskFailed),
            JobOutcome::TimedOut { .. } => Err(ClientError::TaskTimedOut),
            JobOutcome::Cancelled { .. } => Err(ClientError::Cancelled),
        }
    }
}

/// Poll `task_id` until it completes, fails, runs out of attempts or is cancelled.
///
/// # Errors
///
/// A failed status read stops polling and returns [`ClientError::StatusCheck`].
pub async fn poll_until_terminal(
    relay: &dyn RelayService,
    task_id: &str,
    settings: &PollSettings,
    cancel: &CancellationToken,
) -> Result<JobOutcome> {
    let mut checks: u32 = 0;
    let mut unrecognized: HashSet<String> = HashSet::new();

    info!(
        task_id,
        interval_secs = settings.interval.as_secs(),
        max_attempts = settings.max_attempts,
        "[VIDEO] Polling task"
    );

    while checks < settings.max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(task_id, checks, "[VIDEO] Polling cancelled");
                return Ok(JobOutcome::Cancelled { checks });
            }
            _ = tokio::time::sleep(settings.interval) => {}
        }

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(task_id, checks, "[VIDEO] Polling cancelled");
                return Ok(JobOutcome::Cancelled { checks });
            }
            reply = relay.check_video(task_id) => reply,
        };
        let status = reply.map_err(|e| ClientError::StatusCheck(Box::new(e)))?;
        checks += 1;

        debug!(
            task_id,
            checks,
            status = %status.status,
            progress = status.progress,
            "[VIDEO] Status"
        );

        match status.task_status() {
            TaskStatus::Completed => {
                if let Some(video_url) = status.video_url {
                    info!(task_id, checks, "[VIDEO] Task completed");
                    return Ok(JobOutcome::Completed { video_url, checks });
                }
                debug!(task_id, "[VIDEO] Completed without a video url yet");
            }
            TaskStatus::Failed => {
                warn!(task_id, checks, "[VIDEO] Task failed");
                return Ok(JobOutcome::Failed { checks });
            }
            TaskStatus::Pending => {}
            TaskStatus::Unrecognized(raw) => {
                if unrecognized.insert(raw.clone()) {
                    warn!(
                        task_id,
                        status = %raw,
                        "[VIDEO] Unrecognized status, treating as pending"
                    );
                }
            }
        }
    }

    warn!(task_id, checks, "[VIDEO] Task timed out");
    Ok(JobOutcome::TimedOut { checks })
}
