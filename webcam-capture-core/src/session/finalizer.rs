//! Turning buffered chunks into an artifact, and the one place devices are
//! released.
//!
//! Every exit path (normal stop, forced teardown, a failing encoder stop,
//! a re-acquisition) hands the stream to a [`ReleaseGuard`]. The guard stops
//! the tracks and unbinds the preview exactly once, either when asked or when
//! it goes out of scope.

use std::time::Duration;

use parking_lot::Mutex;

use crate::models::artifact::Artifact;
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::session::device_stream::DeviceStream;
use crate::session::preview::PreviewSlot;
use crate::traits::media_stream::MediaStream;

pub struct ReleaseGuard<S: MediaStream> {
    stream: Option<DeviceStream<S>>,
    preview: PreviewSlot,
    done: bool,
}

impl<S: MediaStream> ReleaseGuard<S> {
    pub fn new(stream: Option<DeviceStream<S>>, preview: PreviewSlot) -> Self {
        Self {
            stream,
            preview,
            done: false,
        }
    }

    /// Stop all tracks and detach the preview.
    ///
    /// Returns `true` if a live stream was stopped by this call.
    pub fn release(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        let stopped = match self.stream.take() {
            Some(mut stream) => stream.release(),
            None => false,
        };
        self.preview.clear();
        stopped
    }
}

impl<S: MediaStream> Drop for ReleaseGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Build the artifact from everything buffered, then release the devices.
///
/// Uses the encoder's negotiated mime type when it reports a non-empty one,
/// otherwise `fallback`.
pub fn finalize<S: MediaStream>(
    mut release: ReleaseGuard<S>,
    buffer: &Mutex<ChunkBuffer>,
    negotiated_mime: Option<String>,
    fallback: &str,
    duration: Duration,
) -> Artifact {
    let (payload, chunk_count) = buffer.lock().take();
    let mime_type = negotiated_mime
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    release.release();
    Artifact::new(payload, mime_type, chunk_count, duration)
}

/// Discard everything buffered and release the devices. No artifact.
///
/// Returns the number of chunks thrown away.
pub fn abandon<S: MediaStream>(mut release: ReleaseGuard<S>, buffer: &Mutex<ChunkBuffer>) -> usize {
    let discarded = buffer.lock().discard();
    release.release();
    discarded
}
