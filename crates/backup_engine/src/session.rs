use std::fmt;
use std::time::Duration;

use backup_core::BackupJob;
use backup_logging::{backup_debug, backup_info};
use reqwest::StatusCode;

use crate::types::map_reqwest_error;
use crate::{FailureKind, StageError};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub connect_timeout: Duration,
    /// Idle bound per read, so long streamed downloads are never cut off.
    pub read_timeout: Duration,
    pub user_agent: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(300),
            user_agent: concat!("atlassian-backup/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Cookie-bearing HTTP client that has passed the login check.
///
/// Created once per run and never refreshed.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    client: reqwest::Client,
}

impl AuthenticatedSession {
    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

fn build_client(settings: &SessionSettings) -> Result<reqwest::Client, StageError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .read_timeout(settings.read_timeout)
        .user_agent(settings.user_agent.as_str())
        .cookie_store(true)
        .build()
        .map_err(|err| StageError::new(FailureKind::Network, err.to_string()))
}

/// Logs in with a form POST; only HTTP 200 counts as success.
pub async fn create_session(
    job: &BackupJob,
    credentials: &Credentials,
    settings: &SessionSettings,
) -> Result<AuthenticatedSession, StageError> {
    let client = build_client(settings)?;
    backup_debug!("Logging in to {} as {}", job.login_url, credentials.username);

    let response = client
        .post(&job.login_url)
        .form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ])
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(StageError::new(
            FailureKind::Auth {
                status: status.as_u16(),
            },
            format!("Session creation failed (HTTP {})", status.as_u16()),
        ));
    }

    backup_info!("Session established for {}", job.instance);
    Ok(AuthenticatedSession { client })
}
