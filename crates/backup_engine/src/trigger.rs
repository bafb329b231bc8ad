use backup_core::{BackupJob, Task};
use backup_logging::{backup_error, backup_info};
use reqwest::header::CONTENT_TYPE;

use crate::session::AuthenticatedSession;
use crate::types::map_reqwest_error;
use crate::{Artifact, FailureKind, StageError, StageReport, StageResult};

pub const TRIGGER_SUCCESS: &str = "Trigger response successful";

fn trigger_body() -> String {
    serde_json::json!({ "cbAttachments": "true" }).to_string()
}

/// Asks the instance to start generating a backup. Sent exactly once.
pub async fn trigger(session: &AuthenticatedSession, job: &BackupJob) -> StageResult {
    let response = session
        .client()
        .post(&job.trigger_url)
        .header(CONTENT_TYPE, "application/json")
        .header("X-Atlassian-Token", "no-check")
        .header("X-Requested-With", "XMLHttpRequest")
        .body(trigger_body())
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status().as_u16();
    backup_info!("Trigger response: {status}");
    let body = response.text().await.map_err(map_reqwest_error)?;
    classify_trigger(status, &body)
}

/// Maps the synchronous accept/reject answer to a stage outcome.
pub fn classify_trigger(status: u16, body: &str) -> StageResult {
    if status == 200 {
        return Ok(StageReport::new(Task::Trigger, TRIGGER_SUCCESS, Artifact::Accepted));
    }
    if status == 500 {
        backup_error!("Returned text data: {body}");
    }
    Err(StageError::new(
        FailureKind::Trigger { status },
        format!("Trigger failed with message: {body}"),
    ))
}
