use std::time::Duration;

use backup_core::{BackupJob, PollMachine, PollState, Task, TimeoutBudget, POLL_INTERVAL_SECS};
use backup_logging::{backup_debug, backup_info};

use crate::session::AuthenticatedSession;
use crate::sink::ProgressSink;
use crate::status::fetch_status;
use crate::{Artifact, EngineEvent, FailureKind, StageError, StageReport, StageResult};

pub const MONITOR_SUCCESS: &str = "Remote backup completed";

/// Waits between two status requests.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polling allowance. Status is requested every `POLL_INTERVAL_SECS`, the
/// unit the timeout budget is counted in.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub timeout_minutes: u64,
}

impl PollSettings {
    pub fn with_timeout(timeout_minutes: u64) -> Self {
        Self { timeout_minutes }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::with_timeout(180)
    }
}

/// Polls the status endpoint until a file name appears or the budget runs out.
///
/// Request failures propagate immediately; there is no catch-and-continue.
pub async fn monitor(
    session: &AuthenticatedSession,
    job: &BackupJob,
    settings: &PollSettings,
    pacer: &dyn Pacer,
    sink: &dyn ProgressSink,
) -> StageResult {
    let mut machine = PollMachine::new(TimeoutBudget::from_minutes(settings.timeout_minutes));
    let mut malformed_status = 0;
    let mut reported = false;

    loop {
        let state = match fetch_status(session, &job.status_url).await {
            Ok(snapshot) => {
                let state = machine.observe(&snapshot).clone();
                if state == PollState::Polling {
                    sink.emit(EngineEvent::Polling {
                        percentage: snapshot.label().to_string(),
                        minutes_left: machine.budget().minutes_left(),
                    });
                    reported = true;
                }
                state
            }
            Err(StageError {
                kind: FailureKind::MalformedStatus { status },
                message,
            }) => {
                malformed_status = status;
                machine.reject(message).clone()
            }
            Err(err) => {
                if reported {
                    sink.emit(EngineEvent::PollingFinished);
                }
                return Err(err);
            }
        };

        if state.is_terminal() && reported {
            sink.emit(EngineEvent::PollingFinished);
        }

        match state {
            PollState::Polling => {
                pacer.pause(settings.interval()).await;
                machine.tick();
                backup_debug!(
                    "Polled {} times, {}m left",
                    machine.budget().elapsed_ticks(),
                    machine.budget().minutes_left()
                );
            }
            PollState::Complete { file_name } => {
                backup_info!("Remote backup finished: {file_name}");
                return Ok(StageReport::new(
                    Task::Monitor,
                    MONITOR_SUCCESS,
                    Artifact::RemoteFile { file_name },
                ));
            }
            PollState::TimedOut => {
                let minutes = machine.budget().minutes();
                return Err(StageError::new(
                    FailureKind::TimedOut { minutes },
                    format!("Timed out after {minutes} minutes waiting for the remote backup to complete"),
                ));
            }
            PollState::MalformedResponse { detail } => {
                return Err(StageError::new(
                    FailureKind::MalformedStatus {
                        status: malformed_status,
                    },
                    detail,
                ));
            }
        }
    }
}
