use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use backup_core::{archive_file_name, BackupJob, Task};
use backup_logging::{backup_debug, backup_info, backup_warn};
use bytes::BytesMut;
use chrono::{NaiveDate, Utc};
use futures_util::StreamExt;
use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;

use crate::session::AuthenticatedSession;
use crate::sink::ProgressSink;
use crate::status::fetch_status;
use crate::types::map_reqwest_error;
use crate::{
    Artifact, DownloadResult, EngineEvent, FailureKind, StageError, StageReport, StageResult,
};

pub const DOWNLOAD_SUCCESS: &str = "Backup downloaded successfully";
const CHUNK_SIZE: usize = 1024;
/// Owner rwx, group and other r-x.
const LOCATION_MODE: u32 = 0o755;

#[derive(Clone)]
pub struct DownloadSettings {
    pub destination: PathBuf,
    pub chunk_size: usize,
    pub dir_mode: u32,
    pub today_utc: Arc<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl DownloadSettings {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            chunk_size: CHUNK_SIZE,
            dir_mode: LOCATION_MODE,
            today_utc: Arc::new(|| Utc::now().date_naive()),
        }
    }
}

impl std::fmt::Debug for DownloadSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadSettings")
            .field("destination", &self.destination)
            .field("chunk_size", &self.chunk_size)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .finish_non_exhaustive()
    }
}

/// Ensure the backup directory exists; create it (and parents) if missing.
pub(crate) fn ensure_backup_location(dir: &Path, mode: u32) -> Result<(), StageError> {
    let fail = |detail: String| {
        StageError::new(
            FailureKind::Location,
            format!("Failed to create backup location {}: {detail}", dir.display()),
        )
    };

    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| fail(e.to_string()))?;
        if !meta.is_dir() {
            return Err(fail("path is not a directory".into()));
        }
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(dir).map_err(|e| fail(e.to_string()))
}

/// Resolves the finished archive and streams it to `<destination>/<app>-<YYYYMMDD>.zip`.
pub async fn download(
    session: &AuthenticatedSession,
    job: &BackupJob,
    settings: &DownloadSettings,
    sink: &dyn ProgressSink,
) -> StageResult {
    backup_info!("Fetching file name");
    let snapshot = fetch_status(session, &job.status_url).await?;
    let Some(file_name) = snapshot.file_name else {
        return Err(StageError::new(
            FailureKind::MissingFileName,
            "File name to download not found in server response",
        ));
    };
    backup_info!("Filename found: {file_name}");

    let date = (settings.today_utc)();
    let url = job.download_url(&file_name);
    let response = session
        .client()
        .get(&url)
        .send()
        .await
        .map_err(map_reqwest_error)?;

    let status = response.status();
    backup_info!("Download status code: {}", status.as_u16());
    if status != StatusCode::OK {
        return Err(StageError::new(
            FailureKind::DownloadNotFound {
                status: status.as_u16(),
            },
            format!(
                "Download file not found on remote server: {url} (HTTP {})",
                status.as_u16()
            ),
        ));
    }

    ensure_backup_location(&settings.destination, settings.dir_mode)?;
    let path = settings
        .destination
        .join(archive_file_name(job.application, date));
    backup_debug!("Writing archive to {}", path.display());

    let io_error = |err: std::io::Error| {
        StageError::new(
            FailureKind::Io,
            format!("Failed writing {}: {err}", path.display()),
        )
    };

    // File::create truncates, so a same-day archive is replaced, never appended to.
    let mut file = tokio::fs::File::create(&path).await.map_err(io_error)?;
    let chunk_size = settings.chunk_size.max(1);
    let mut pending = BytesMut::with_capacity(chunk_size * 2);
    let mut total: u64 = 0;
    let mut stream = response.bytes_stream();

    sink.emit(EngineEvent::Downloaded { bytes: 0 });
    while let Some(piece) = stream.next().await {
        let piece = piece.map_err(map_reqwest_error)?;
        pending.extend_from_slice(&piece);
        while pending.len() >= chunk_size {
            let chunk = pending.split_to(chunk_size);
            file.write_all(&chunk).await.map_err(io_error)?;
            total += chunk.len() as u64;
            sink.emit(EngineEvent::Downloaded { bytes: total });
        }
    }
    if !pending.is_empty() {
        file.write_all(&pending).await.map_err(io_error)?;
        total += pending.len() as u64;
        sink.emit(EngineEvent::Downloaded { bytes: total });
    }
    file.flush().await.map_err(io_error)?;
    drop(file);

    if total == 0 {
        backup_warn!("Remote archive {file_name} was empty");
    }
    sink.emit(EngineEvent::DownloadFinished { bytes: total });

    Ok(StageReport::new(
        Task::Download,
        DOWNLOAD_SUCCESS,
        Artifact::Archive(DownloadResult { path, bytes: total }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_nested_location() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b");
        ensure_backup_location(&dir, LOCATION_MODE).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn existing_location_is_fine() {
        let temp = TempDir::new().unwrap();
        ensure_backup_location(temp.path(), LOCATION_MODE).unwrap();
        ensure_backup_location(temp.path(), LOCATION_MODE).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn new_location_gets_requested_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("backups");
        ensure_backup_location(&dir, LOCATION_MODE).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        // umask may only remove bits.
        assert_eq!(mode & !LOCATION_MODE, 0);
        assert_ne!(mode & 0o700, 0);
    }

    #[test]
    fn file_in_the_way_is_a_location_error() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("not_a_dir");
        fs::write(&file_path, "x").unwrap();

        let err = ensure_backup_location(&file_path, LOCATION_MODE).unwrap_err();
        assert_eq!(err.kind, FailureKind::Location);
        assert!(err.message.contains("not a directory"));
    }
}
