//! Test-pattern encoder.
//!
//! Emits one chunk per timeslice on a dedicated thread:
//! ```text
//! [4-byte magic "TPAT"] [4-byte LE sequence number] [chunk_size bytes of (seq as u8)]
//! ```
//! On stop the worker leaves its loop, flushes one final chunk, and exits;
//! `stop` joins it, so every chunk is delivered before `stop` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use webcam_capture_core::models::error::CaptureError;
use webcam_capture_core::traits::media_encoder::{ChunkCallback, MediaEncoder};

pub const CHUNK_MAGIC: &[u8; 4] = b"TPAT";
pub const CHUNK_HEADER_SIZE: usize = 8;

pub struct TestPatternEncoder {
    video_live: Arc<AtomicBool>,
    mime_type: Option<String>,
    timeslice: Duration,
    chunk_size: usize,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl TestPatternEncoder {
    pub fn new(video_live: Arc<AtomicBool>, mime_type: Option<String>, timeslice: Duration, chunk_size: usize) -> Self {
        Self {
            video_live,
            mime_type,
            timeslice,
            chunk_size,
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// Build chunk number `seq`.
    pub fn chunk(seq: u32, chunk_size: usize) -> Vec<u8> {
        let mut chunk = Vec::with_capacity(CHUNK_HEADER_SIZE + chunk_size);
        chunk.extend_from_slice(CHUNK_MAGIC);
        chunk.extend_from_slice(&seq.to_le_bytes());
        chunk.resize(CHUNK_HEADER_SIZE + chunk_size, seq as u8);
        chunk
    }
}

impl MediaEncoder for TestPatternEncoder {
    fn start(&mut self, on_chunk: ChunkCallback) -> Result<(), CaptureError> {
        if self.worker.lock().is_some() {
            return Err(CaptureError::InvalidState("encoder already started".into()));
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let video_live = Arc::clone(&self.video_live);
        let timeslice = self.timeslice;
        let chunk_size = self.chunk_size;

        let handle = thread::Builder::new()
            .name("test-pattern-encoder".into())
            .spawn(move || {
                let mut seq: u32 = 0;
                while running.load(Ordering::SeqCst) {
                    thread::sleep(timeslice);
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }
                    if !video_live.load(Ordering::SeqCst) {
                        log::warn!("Video track ended while encoding");
                        break;
                    }
                    on_chunk(&TestPatternEncoder::chunk(seq, chunk_size));
                    seq += 1;
                }
                // Final flush, as a real encoder emits its trailing data on stop.
                on_chunk(&TestPatternEncoder::chunk(seq, chunk_size));
                running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| CaptureError::Unknown(format!("failed to spawn encoder thread: {}", e)))?;

        *self.worker.lock() = Some(handle);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        let handle = self
            .worker
            .lock()
            .take()
            .ok_or_else(|| CaptureError::InvalidState("encoder is not running".into()))?;
        self.running.store(false, Ordering::SeqCst);
        handle
            .join()
            .map_err(|_| CaptureError::EncodingFailed("encoder thread panicked".into()))
    }

    fn mime_type(&self) -> Option<String> {
        self.mime_type.clone()
    }
}

impl Drop for TestPatternEncoder {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn collecting() -> (ChunkCallback, Arc<Mutex<Vec<Vec<u8>>>>) {
        let chunks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&chunks);
        let callback: ChunkCallback = Arc::new(move |c: &[u8]| sink.lock().push(c.to_vec()));
        (callback, chunks)
    }

    fn encoder() -> TestPatternEncoder {
        TestPatternEncoder::new(
            Arc::new(AtomicBool::new(true)),
            Some("video/webm".into()),
            Duration::from_millis(5),
            16,
        )
    }

    #[test]
    fn chunk_layout() {
        let chunk = TestPatternEncoder::chunk(3, 4);
        assert_eq!(&chunk[..4], CHUNK_MAGIC);
        assert_eq!(u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]), 3);
        assert_eq!(&chunk[8..], &[3, 3, 3, 3]);
    }

    #[test]
    fn stop_delivers_sequenced_chunks() {
        let (callback, chunks) = collecting();
        let mut encoder = encoder();
        encoder.start(callback).unwrap();
        thread::sleep(Duration::from_millis(40));
        encoder.stop().unwrap();

        let chunks = chunks.lock();
        assert!(!chunks.is_empty());
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]), i as u32);
        }
    }

    #[test]
    fn immediate_stop_still_flushes() {
        let (callback, chunks) = collecting();
        let mut encoder = encoder();
        encoder.start(callback).unwrap();
        encoder.stop().unwrap();
        assert!(!chunks.lock().is_empty());
    }

    #[test]
    fn second_stop_is_an_error() {
        let (callback, _chunks) = collecting();
        let mut encoder = encoder();
        encoder.start(callback).unwrap();
        encoder.stop().unwrap();
        assert!(encoder.stop().is_err());
    }

    #[test]
    fn stop_without_start_is_an_error() {
        let mut encoder = encoder();
        assert!(matches!(encoder.stop(), Err(CaptureError::InvalidState(_))));
    }

    #[test]
    fn ended_video_track_stops_chunking() {
        let live = Arc::new(AtomicBool::new(true));
        let (callback, chunks) = collecting();
        let mut encoder = TestPatternEncoder::new(Arc::clone(&live), None, Duration::from_millis(5), 8);
        encoder.start(callback).unwrap();
        live.store(false, Ordering::SeqCst);

        // The worker clears `running` on its way out, after the final flush.
        let deadline = Instant::now() + Duration::from_secs(5);
        while encoder.running.load(Ordering::SeqCst) {
            assert!(Instant::now() < deadline, "worker did not exit after the track ended");
            thread::sleep(Duration::from_millis(1));
        }
        let seen = chunks.lock().len();
        assert!(seen >= 1);

        encoder.stop().unwrap();
        assert_eq!(chunks.lock().len(), seen);
        assert!(encoder.mime_type().is_none());
    }
}
