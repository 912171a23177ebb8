use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};

use super::metadata::SessionMetadata;

/// A finalized recording: the concatenated encoder output and its mime type.
///
/// The payload is immutable and cheaply cloneable, so a caller can derive any
/// number of downloads from one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    data: Arc<[u8]>,
    mime_type: String,
    chunk_count: usize,
    duration: Duration,
}

impl Artifact {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, chunk_count: usize, duration: Duration) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            chunk_count,
            duration,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Number of non-empty chunks that made up the payload.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Wall-clock time between encoder start and stop.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// SHA-256 of the payload, lowercase hex.
    pub fn checksum(&self) -> String {
        let digest = Sha256::digest(self.bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// The pair handed to the caller once a session completes.
///
/// The core only produces the artifact; the metadata record is assembled by
/// the caller and travels alongside it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub artifact: Option<Artifact>,
    pub metadata: SessionMetadata,
}

impl SessionOutcome {
    pub fn new(artifact: Option<Artifact>, metadata: SessionMetadata) -> Self {
        Self { artifact, metadata }
    }

    pub fn has_video(&self) -> bool {
        self.artifact.is_some()
    }
}
