//! Backup core: job derivation, task selection, and the pure polling state machine.
mod application;
mod archive;
mod error;
mod job;
mod poll;
mod progress;
mod status;
mod tasks;

pub use application::Application;
pub use archive::archive_file_name;
pub use error::ConfigError;
pub use job::{BackupJob, ATLASSIAN_DOMAIN};
pub use poll::{PollMachine, PollState, TimeoutBudget, POLL_INTERVAL_SECS};
pub use progress::{download_line, poll_line};
pub use status::StatusSnapshot;
pub use tasks::{Task, TaskSet};
