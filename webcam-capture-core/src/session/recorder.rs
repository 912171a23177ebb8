use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::models::artifact::Artifact;
use crate::models::config::RecorderConfiguration;
use crate::models::error::CaptureError;
use crate::models::media::StreamInfo;
use crate::models::state::{PermissionState, SessionPhase};
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::processing::codec;
use crate::session::acquisition::DeviceAcquisition;
use crate::session::finalizer;
use crate::session::preview::PreviewSlot;
use crate::traits::capture_backend::CaptureBackend;
use crate::traits::media_encoder::{ChunkCallback, MediaEncoder};
use crate::traits::session_delegate::SessionDelegate;

/// Counters for debugging capture sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDiagnostics {
    pub recordings_started: u64,
    pub artifacts_produced: u64,
    pub chunks_buffered: u64,
    pub chunks_dropped: u64,
    pub bytes_buffered: u64,
    pub chunks_discarded: u64,
}

struct ActiveEncoder<E> {
    encoder: E,
    started_at: Instant,
}

/// Capture session state machine.
///
/// Owns one device stream (through [`DeviceAcquisition`]) and, while
/// recording, one encoder bound to it. Chunks flow from the encoder thread
/// into a shared [`ChunkBuffer`]:
/// ```text
/// [Backend stream] → [Encoder] → ChunkCallback → [ChunkBuffer] → finalize → Artifact
/// ```
///
/// `acquire` and `stop` block until the backend answers; those are the only
/// suspension points. Dropping the session is a forced teardown.
pub struct CaptureSession<B: CaptureBackend> {
    config: RecorderConfiguration,
    devices: DeviceAcquisition<B>,
    phase: SessionPhase,
    encoder: Option<ActiveEncoder<B::Encoder>>,
    buffer: Arc<Mutex<ChunkBuffer>>,
    generation: u64,
    diagnostics: Arc<Mutex<SessionDiagnostics>>,
    preview: PreviewSlot,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<B: CaptureBackend> CaptureSession<B> {
    pub fn new(backend: B, config: RecorderConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        let preview = PreviewSlot::new();
        Ok(Self {
            devices: DeviceAcquisition::new(backend, config.constraints(), preview.clone()),
            config,
            phase: SessionPhase::Idle,
            encoder: None,
            buffer: Arc::new(Mutex::new(ChunkBuffer::new())),
            generation: 0,
            diagnostics: Arc::new(Mutex::new(SessionDiagnostics::default())),
            preview,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn permission(&self) -> PermissionState {
        self.devices.permission()
    }

    pub fn config(&self) -> &RecorderConfiguration {
        &self.config
    }

    pub fn preview(&self) -> PreviewSlot {
        self.preview.clone()
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.diagnostics.lock().clone()
    }

    pub fn stream_info(&self) -> Option<StreamInfo> {
        self.devices.stream().map(|s| s.info().clone())
    }

    /// Tracks still live on the held stream (0 when none is held).
    pub fn live_track_count(&self) -> usize {
        self.devices.stream().map_or(0, |s| s.live_track_count())
    }

    /// Chunks buffered so far in the current recording.
    pub fn buffered_chunks(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Acquire camera and microphone. Transitions: idle/denied/ready →
    /// acquiring → ready | denied.
    ///
    /// A stream already held is released before the new request.
    pub fn acquire(&mut self) -> Result<StreamInfo, CaptureError> {
        if !self.phase.can_acquire() {
            log::warn!("Ignoring acquire while {}", self.phase.as_str());
            return Err(CaptureError::AlreadyRecording);
        }

        self.set_phase(SessionPhase::Acquiring);
        let result = self.devices.acquire();
        self.notify_permission();

        match result {
            Ok(acquired) => {
                if let Some(warning) = acquired.preview_warning {
                    self.warn(&warning);
                }
                self.set_phase(SessionPhase::Ready);
                Ok(acquired.stream)
            }
            Err(e) => {
                self.set_phase(SessionPhase::Denied);
                Err(e)
            }
        }
    }

    /// Start a recording. Transitions: ready → recording.
    ///
    /// Acquires first when no stream is held. A second start while a
    /// recording is running is rejected and leaves that recording alone.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.phase.is_busy() || self.encoder.is_some() {
            log::warn!("Rejecting start: a recording is already in progress");
            return Err(CaptureError::AlreadyRecording);
        }

        if !self.devices.has_stream() {
            self.acquire()?;
        }

        let backend = self.devices.backend();
        let mime_type = codec::select_mime_type(
            &self.config.mime_candidates,
            &self.config.fallback_mime_type,
            |m| backend.is_type_supported(m),
        );
        let options = self.config.encoder_options(mime_type);
        let mut encoder = self.devices.create_encoder(&options)?;

        self.generation += 1;
        let generation = self.generation;
        self.buffer.lock().reset(generation);

        let buffer = Arc::clone(&self.buffer);
        let diagnostics = Arc::clone(&self.diagnostics);
        let callback: ChunkCallback = Arc::new(move |chunk: &[u8]| {
            let accepted = buffer.lock().push(generation, chunk);
            let mut d = diagnostics.lock();
            if accepted {
                d.chunks_buffered += 1;
                d.bytes_buffered += chunk.len() as u64;
            } else {
                d.chunks_dropped += 1;
            }
        });

        if let Err(e) = encoder.start(callback) {
            log::error!("Failed to start encoder: {}", e);
            self.buffer.lock().discard();
            return Err(e);
        }

        log::info!(
            "Recording started ({}, {} bps)",
            options.mime_type,
            options.video_bits_per_second
        );
        self.diagnostics.lock().recordings_started += 1;
        self.encoder = Some(ActiveEncoder {
            encoder,
            started_at: Instant::now(),
        });
        self.set_phase(SessionPhase::Recording);
        Ok(())
    }

    /// Stop the recording, finalize the artifact, release the devices.
    /// Transitions: recording → finalizing → idle.
    ///
    /// Without a running encoder this only releases whatever is still held
    /// and returns `None`. Never fails: an encoder that errors on stop is
    /// treated as stopped and whatever it buffered is still finalized.
    pub fn stop(&mut self) -> Option<Artifact> {
        let Some(active) = self.encoder.take() else {
            if self.devices.release() {
                log::info!("Stop without an active recording; released device stream");
            }
            if self.phase != SessionPhase::Denied {
                self.set_phase(SessionPhase::Idle);
            }
            return None;
        };

        self.set_phase(SessionPhase::Finalizing);
        let release = self.devices.take_release_guard();
        let ActiveEncoder {
            mut encoder,
            started_at,
        } = active;

        if let Err(e) = encoder.stop() {
            log::warn!("Encoder stop failed, finalizing buffered output: {}", e);
            self.warn(&e);
        }

        let artifact = finalizer::finalize(
            release,
            &self.buffer,
            encoder.mime_type(),
            &self.config.fallback_mime_type,
            started_at.elapsed(),
        );
        drop(encoder);

        self.diagnostics.lock().artifacts_produced += 1;
        log::info!(
            "Recording finalized: {} bytes in {} chunks ({})",
            artifact.size(),
            artifact.chunk_count(),
            artifact.mime_type()
        );

        self.set_phase(SessionPhase::Idle);
        if let Some(ref delegate) = self.delegate {
            delegate.on_artifact_ready(&artifact);
        }
        Some(artifact)
    }

    /// Forced teardown from any phase: stop the encoder, release the
    /// devices, discard buffered output. Produces no artifact.
    pub fn teardown(&mut self) {
        if self.phase.is_idle() && self.encoder.is_none() && !self.devices.has_stream() {
            return;
        }

        let release = self.devices.take_release_guard();
        if let Some(mut active) = self.encoder.take() {
            if let Err(e) = active.encoder.stop() {
                log::debug!("Encoder stop during teardown: {}", e);
            }
        }

        let discarded = finalizer::abandon(release, &self.buffer);
        if discarded > 0 {
            log::info!("Teardown discarded {} buffered chunks", discarded);
            self.diagnostics.lock().chunks_discarded += discarded as u64;
        }
        self.set_phase(SessionPhase::Idle);
    }

    // --- Internal helpers ---

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase == phase {
            return;
        }
        log::debug!("Capture session {} → {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
        if let Some(ref delegate) = self.delegate {
            delegate.on_phase_changed(phase);
        }
    }

    fn notify_permission(&self) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_permission_changed(self.devices.permission());
        }
    }

    fn warn(&self, error: &CaptureError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_warning(error);
        }
    }
}

impl<B: CaptureBackend> Drop for CaptureSession<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
