mod cli;
mod console;
mod credentials;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use backup_engine::{run, Collaborators, Credentials, TokioPacer};
use backup_logging::{backup_error, NullStageLog, StageLog, SyslogStageLog};
use clap::Parser;

use crate::cli::Args;
use crate::console::ConsoleProgressSink;
use crate::credentials::{resolve_password, PromptCredentialSource};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::initialize(args.verbose);

    match run_backup(args) {
        Ok(code) => code,
        Err(err) => {
            backup_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_backup(args: Args) -> anyhow::Result<ExitCode> {
    let config = match args.run_config() {
        Ok(config) => config,
        Err(err) => {
            backup_error!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let password = resolve_password(args.password, &args.username, &PromptCredentialSource)?;
    let credentials = Credentials::new(args.username, password);

    let stage_log: Box<dyn StageLog> = if args.log {
        Box::new(SyslogStageLog::open(&config.job.application.to_string()))
    } else {
        Box::new(NullStageLog)
    };
    let sink = ConsoleProgressSink::new(!args.no_progress);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let summary = runtime.block_on(run(
        &config,
        &credentials,
        Collaborators {
            pacer: &TokioPacer,
            sink: &sink,
            stage_log: stage_log.as_ref(),
        },
    ));

    if summary.is_success() {
        println!("All tasks completed.");
    }
    Ok(ExitCode::from(summary.exit_code()))
}
