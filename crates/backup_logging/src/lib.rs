#![deny(missing_docs)]
//! Shared logging utilities for the backup workspace.
//!
//! This crate provides the `backup_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger, and the [`StageLog`]
//! collaborator that forwards one message per completed stage to syslog.

mod stage_log;

pub use stage_log::{syslog_tag, NullStageLog, StageLog, SyslogStageLog};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! backup_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! backup_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! backup_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! backup_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! backup_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Routes backup log output to stderr at trace level for tests.
///
/// HTTP client internals are filtered out. Calling it again, or after any
/// other logger was installed, does nothing.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("wiremock")
        .build();
    let _ = TermLogger::init(
        log::LevelFilter::Trace,
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}
