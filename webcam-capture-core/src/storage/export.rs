//! Writing a finished session to disk: the video artifact plus a JSON sidecar
//! with the caller's metadata record.
//!
//! Files are named `{childId}_{game}_{timestamp}` where the timestamp is the
//! record's ISO-8601 UTC time with `:` and `-` stripped, for example
//! `LRH001_FreezeHero_20240501T120000.000Z.webm`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;

use crate::models::artifact::SessionOutcome;
use crate::models::error::CaptureError;
use crate::models::metadata::{SessionMetadata, CHILD_ID, GAME};
use crate::processing::codec::extension_for_mime;

const UNKNOWN: &str = "unknown";

/// Paths written by [`export_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSession {
    /// `None` when the session produced no artifact.
    pub video_path: Option<PathBuf>,
    pub metadata_path: PathBuf,
    /// SHA-256 of the video file, lowercase hex.
    pub checksum: Option<String>,
}

/// Compact UTC timestamp used in file names (`20240501T120000.000Z`).
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|t| t.format("%Y%m%dT%H%M%S%.3fZ").to_string())
}

/// Base file name for a session, without extension.
pub fn base_name(metadata: &SessionMetadata) -> String {
    let child = metadata.get_str(CHILD_ID).filter(|s| !s.is_empty());
    let game = metadata.get_str(GAME).filter(|s| !s.is_empty());
    let ts = metadata.timestamp_millis().and_then(format_timestamp);
    format!(
        "{}_{}_{}",
        sanitize(child.as_deref().unwrap_or(UNKNOWN)),
        sanitize(game.as_deref().unwrap_or(UNKNOWN)),
        ts.as_deref().unwrap_or(UNKNOWN)
    )
}

/// Write the artifact (if any) and its metadata sidecar into `directory`.
pub fn export_outcome(outcome: &SessionOutcome, directory: &Path) -> Result<ExportedSession, CaptureError> {
    fs::create_dir_all(directory)
        .map_err(|e| CaptureError::StorageError(format!("failed to create directory: {}", e)))?;

    let base = base_name(&outcome.metadata);

    let (video_path, checksum) = match outcome.artifact {
        Some(ref artifact) => {
            let path = directory.join(format!("{}.{}", base, extension_for_mime(artifact.mime_type())));
            fs::write(&path, artifact.bytes())
                .map_err(|e| CaptureError::StorageError(format!("failed to write video: {}", e)))?;
            log::info!("Wrote {} ({} bytes)", path.display(), artifact.size());
            (Some(path), Some(artifact.checksum()))
        }
        None => (None, None),
    };

    let metadata_path = directory.join(format!("{}.json", base));
    let json = outcome
        .metadata
        .to_json_pretty()
        .map_err(|e| CaptureError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json)
        .map_err(|e| CaptureError::StorageError(format!("failed to write metadata: {}", e)))?;

    Ok(ExportedSession {
        video_path,
        metadata_path,
        checksum,
    })
}

/// Read a metadata sidecar back.
pub fn read_metadata(path: &Path) -> Result<SessionMetadata, CaptureError> {
    let json = fs::read_to_string(path)
        .map_err(|e| CaptureError::StorageError(format!("failed to read metadata: {}", e)))?;
    serde_json::from_str(&json)
        .map_err(|e| CaptureError::StorageError(format!("failed to parse metadata: {}", e)))
}

// Keep ids from escaping the export directory.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect()
}
