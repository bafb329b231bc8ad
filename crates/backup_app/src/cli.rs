use std::path::PathBuf;

use backup_core::{Application, BackupJob, ConfigError, TaskSet};
use backup_engine::{DownloadSettings, PollSettings, RunConfig, SessionSettings};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "atlassian-backup", version)]
#[command(about = "Trigger, monitor and download Atlassian Cloud backups", long_about = None)]
pub struct Args {
    /// Atlassian instance name, without `.atlassian.net`
    #[arg(short, long)]
    pub instance: String,

    /// Application to back up: Jira or Confluence. The archive is saved as
    /// jira-YYYYMMDD.zip or confluence-YYYYMMDD.zip whatever the case given
    #[arg(short, long)]
    pub application: String,

    /// Username used to log in to the web application
    #[arg(short, long)]
    pub username: String,

    /// Password; prompted for without echo when the flag has no value
    #[arg(short, long, num_args = 0..=1, required = true)]
    pub password: Option<Option<String>>,

    /// Minutes to wait for the remote backup to complete
    #[arg(short, long, default_value_t = 180)]
    pub timeout: u64,

    /// Directory the backup archive is written to
    #[arg(short, long, default_value = "/tmp/")]
    pub location: PathBuf,

    /// Tasks to perform: t (trigger), m (monitor), d (download)
    #[arg(long, num_args = 1..)]
    pub tasks: Option<Vec<String>>,

    /// Forward stage results to the local syslog
    #[arg(long)]
    pub log: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Do not draw the progress line
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Validates the arguments. No network activity happens before this succeeds.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let application: Application = self.application.parse()?;
        let job = BackupJob::for_instance(application, &self.instance)?;
        let tasks = TaskSet::parse(self.tasks.as_deref())?;

        Ok(RunConfig {
            job,
            tasks,
            session: SessionSettings::default(),
            poll: PollSettings::with_timeout(self.timeout),
            download: DownloadSettings::new(&self.location),
        })
    }
}
