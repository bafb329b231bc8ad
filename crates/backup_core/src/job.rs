use crate::{Application, ConfigError};

/// Domain appended to the bare instance name given on the command line.
pub const ATLASSIAN_DOMAIN: &str = ".atlassian.net";

/// Endpoints of one backup run, derived once from application and instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupJob {
    pub application: Application,
    pub instance: String,
    pub login_url: String,
    pub trigger_url: String,
    pub status_url: String,
    pub download_base_url: String,
}

impl BackupJob {
    /// Derives the job for a hosted instance, e.g. `acme` -> `https://acme.atlassian.net`.
    pub fn for_instance(application: Application, instance: &str) -> Result<Self, ConfigError> {
        let instance = instance.trim();
        if instance.is_empty() {
            return Err(ConfigError::EmptyInstance);
        }
        Ok(Self::with_base_url(
            application,
            &format!("https://{instance}{ATLASSIAN_DOMAIN}"),
        ))
    }

    /// Derives the job against an explicit base URL (scheme and host, no trailing slash).
    pub fn with_base_url(application: Application, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let instance = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .unwrap_or(base)
            .to_string();
        let app_root = format!("{base}{}", application.context_path());
        let download_base_url = match application {
            Application::Jira => base.to_string(),
            Application::Confluence => format!("{app_root}/download/"),
        };

        Self {
            application,
            instance,
            login_url: format!("{base}/login"),
            trigger_url: format!("{app_root}/rest/obm/1.0/runbackup"),
            status_url: format!("{app_root}/rest/obm/1.0/getprogress.json"),
            download_base_url,
        }
    }

    /// Full archive URL for the file name reported by the status endpoint.
    pub fn download_url(&self, file_name: &str) -> String {
        format!("{}{}", self.download_base_url, file_name)
    }
}
