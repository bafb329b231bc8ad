use std::fmt;
use std::path::PathBuf;

use backup_core::Task;

/// Progress notifications emitted while a stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Polling { percentage: String, minutes_left: u64 },
    /// Polling stopped after at least one `Polling` event.
    PollingFinished,
    Downloaded { bytes: u64 },
    DownloadFinished { bytes: u64 },
}

/// Local archive written by the download stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Accepted,
    RemoteFile { file_name: String },
    Archive(DownloadResult),
}

/// Successful stage outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub task: Task,
    pub message: String,
    pub artifact: Artifact,
}

impl StageReport {
    pub(crate) fn new(task: Task, message: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            task,
            message: message.into(),
            artifact,
        }
    }
}

/// Failed stage outcome: what went wrong and the message to log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StageError {
    pub kind: FailureKind,
    pub message: String,
}

impl StageError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type StageResult = Result<StageReport, StageError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Auth { status: u16 },
    Trigger { status: u16 },
    MalformedStatus { status: u16 },
    TimedOut { minutes: u64 },
    MissingFileName,
    DownloadNotFound { status: u16 },
    Location,
    RequestTimeout,
    Network,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Auth { status } => write!(f, "authentication failed (http status {status})"),
            FailureKind::Trigger { status } => write!(f, "trigger rejected (http status {status})"),
            FailureKind::MalformedStatus { status } => {
                write!(f, "malformed status response (http status {status})")
            }
            FailureKind::TimedOut { minutes } => write!(f, "timed out after {minutes}m"),
            FailureKind::MissingFileName => write!(f, "file name missing"),
            FailureKind::DownloadNotFound { status } => {
                write!(f, "download not found (http status {status})")
            }
            FailureKind::Location => write!(f, "backup location unavailable"),
            FailureKind::RequestTimeout => write!(f, "request timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> StageError {
    if err.is_timeout() {
        return StageError::new(FailureKind::RequestTimeout, format!("request timed out: {err}"));
    }
    StageError::new(FailureKind::Network, format!("request failed: {err}"))
}
