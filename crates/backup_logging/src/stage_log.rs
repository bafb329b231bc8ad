use std::ffi::CString;

/// Receives one free-text message per completed stage.
///
/// Implementations must never fail the caller: a message that cannot be
/// delivered is dropped.
pub trait StageLog: Send + Sync {
    /// Records a stage message.
    fn record(&self, message: &str);
}

/// Discards every message. Used when `--log` is not given.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStageLog;

impl StageLog for NullStageLog {
    fn record(&self, _message: &str) {}
}

/// Builds the syslog ident for an application, e.g. `ATLASSIAN_BACKUP_JIRA`.
pub fn syslog_tag(application: &str) -> String {
    format!("ATLASSIAN_BACKUP_{application}").to_uppercase()
}

/// Forwards stage messages to the local system log at info priority.
pub struct SyslogStageLog {
    // openlog keeps the pointer, so the ident must outlive the open log.
    #[cfg_attr(not(unix), allow(dead_code))]
    ident: CString,
}

impl SyslogStageLog {
    /// Opens the system log with an ident derived from `application`.
    pub fn open(application: &str) -> Self {
        let ident = to_c_string(&syslog_tag(application));
        #[cfg(unix)]
        // SAFETY: `ident` is NUL-terminated and owned by the returned value,
        // which calls `closelog` before dropping it.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, libc::LOG_USER);
        }
        #[cfg(not(unix))]
        crate::backup_warn!("syslog is not available on this platform; stage log disabled");
        Self { ident }
    }
}

impl StageLog for SyslogStageLog {
    #[cfg(unix)]
    fn record(&self, message: &str) {
        let message = to_c_string(message);
        // SAFETY: both pointers are valid NUL-terminated strings; the format
        // string consumes exactly one `%s` argument.
        unsafe {
            libc::syslog(libc::LOG_INFO, c"%s".as_ptr(), message.as_ptr());
        }
    }

    #[cfg(not(unix))]
    fn record(&self, _message: &str) {}
}

impl Drop for SyslogStageLog {
    fn drop(&mut self) {
        #[cfg(unix)]
        // SAFETY: paired with the `openlog` in `open`.
        unsafe {
            libc::closelog();
        }
    }
}

fn to_c_string(text: &str) -> CString {
    let cleaned: String = text.chars().map(|c| if c == '\0' { ' ' } else { c }).collect();
    // Interior NULs were replaced above.
    CString::new(cleaned).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_upper_cased() {
        assert_eq!(syslog_tag("Confluence"), "ATLASSIAN_BACKUP_CONFLUENCE");
        assert_eq!(syslog_tag("jira"), "ATLASSIAN_BACKUP_JIRA");
    }

    #[test]
    fn interior_nul_is_replaced() {
        let c = to_c_string("a\0b");
        assert_eq!(c.to_str().unwrap(), "a b");
    }

    #[test]
    fn null_stage_log_accepts_anything() {
        NullStageLog.record("ignored");
    }
}
