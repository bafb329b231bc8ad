use backup_core::{BackupJob, Task, TaskSet};
use backup_logging::{backup_error, backup_info, StageLog};

use crate::download::{download, DownloadSettings};
use crate::monitor::{monitor, Pacer, PollSettings};
use crate::session::{create_session, AuthenticatedSession, Credentials, SessionSettings};
use crate::sink::ProgressSink;
use crate::trigger::trigger;
use crate::{StageError, StageReport};

pub const ALL_TASKS_SUCCESS: &str = "All tasks completed successfully";

/// Everything a run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub job: BackupJob,
    pub tasks: TaskSet,
    pub session: SessionSettings,
    pub poll: PollSettings,
    pub download: DownloadSettings,
}

/// Capabilities injected into a run.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub pacer: &'a dyn Pacer,
    pub sink: &'a dyn ProgressSink,
    pub stage_log: &'a dyn StageLog,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub completed: Vec<StageReport>,
    pub failure: Option<StageError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Logs in, then runs the requested tasks.
pub async fn run(
    config: &RunConfig,
    credentials: &Credentials,
    collaborators: Collaborators<'_>,
) -> RunSummary {
    let session = match create_session(&config.job, credentials, &config.session).await {
        Ok(session) => session,
        Err(err) => {
            backup_error!("{err}");
            collaborators.stage_log.record(&err.message);
            return RunSummary {
                completed: Vec::new(),
                failure: Some(err),
            };
        }
    };
    run_tasks(&session, config, collaborators).await
}

/// Runs trigger, monitor and download in that order, stopping at the first failure.
pub async fn run_tasks(
    session: &AuthenticatedSession,
    config: &RunConfig,
    collaborators: Collaborators<'_>,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for task in config.tasks.iter() {
        let outcome = match task {
            Task::Trigger => {
                backup_info!("Triggering backup");
                trigger(session, &config.job).await
            }
            Task::Monitor => {
                backup_info!("Monitoring remote backup progress");
                monitor(
                    session,
                    &config.job,
                    &config.poll,
                    collaborators.pacer,
                    collaborators.sink,
                )
                .await
            }
            Task::Download => {
                backup_info!("Downloading file");
                download(session, &config.job, &config.download, collaborators.sink).await
            }
        };

        match outcome {
            Ok(report) => {
                backup_info!("{task}: {}", report.message);
                collaborators.stage_log.record(&report.message);
                summary.completed.push(report);
            }
            Err(err) => {
                backup_error!("{task} failed ({}): {}", err.kind, err.message);
                collaborators.stage_log.record(&err.message);
                summary.failure = Some(err);
                return summary;
            }
        }
    }

    collaborators.stage_log.record(ALL_TASKS_SUCCESS);
    summary
}
