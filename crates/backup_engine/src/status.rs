use backup_core::StatusSnapshot;
use backup_logging::backup_trace;

use crate::session::AuthenticatedSession;
use crate::types::map_reqwest_error;
use crate::{FailureKind, StageError};

/// One GET of the progress endpoint. Unparsable bodies become `MalformedStatus`.
pub(crate) async fn fetch_status(
    session: &AuthenticatedSession,
    status_url: &str,
) -> Result<StatusSnapshot, StageError> {
    let response = session
        .client()
        .get(status_url)
        .send()
        .await
        .map_err(map_reqwest_error)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(map_reqwest_error)?;
    backup_trace!("Status response {status}: {body}");

    StatusSnapshot::parse(&body).map_err(|err| {
        StageError::new(
            FailureKind::MalformedStatus { status },
            format!(
                "No JSON object could be decoded - get progress failed to return expected data. Return code: {status} ({err})"
            ),
        )
    })
}
