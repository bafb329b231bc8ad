use thiserror::Error;

/// Invalid command-line configuration, detected before any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid application {0:?}: request either \"Jira\" or \"Confluence\"")]
    UnknownApplication(String),
    #[error("invalid task {0:?}: supply 't' (trigger), 'm' (monitor) or 'd' (download)")]
    InvalidTask(String),
    #[error("no tasks supplied: supply 't' (trigger), 'm' (monitor) or 'd' (download)")]
    EmptyTasks,
    #[error("instance name must not be empty")]
    EmptyInstance,
}
