//! Backup engine: session, trigger, polling and download IO.
mod download;
mod monitor;
mod run;
mod session;
mod sink;
mod status;
mod trigger;
mod types;

pub use download::{download, DownloadSettings, DOWNLOAD_SUCCESS};
pub use monitor::{monitor, Pacer, PollSettings, TokioPacer, MONITOR_SUCCESS};
pub use run::{run, run_tasks, Collaborators, RunConfig, RunSummary, ALL_TASKS_SUCCESS};
pub use session::{create_session, AuthenticatedSession, Credentials, SessionSettings};
pub use sink::{NullProgressSink, ProgressSink};
pub use trigger::{classify_trigger, trigger, TRIGGER_SUCCESS};
pub use types::{
    Artifact, DownloadResult, EngineEvent, FailureKind, StageError, StageReport, StageResult,
};
