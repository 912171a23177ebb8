//! Scripted in-memory backend for deterministic session tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::artifact::Artifact;
use crate::models::error::CaptureError;
use crate::models::media::{EncoderOptions, StreamConstraints, StreamInfo, TrackInfo, TrackKind};
use crate::models::state::{PermissionState, SessionPhase};
use crate::traits::capture_backend::CaptureBackend;
use crate::traits::media_encoder::{ChunkCallback, MediaEncoder};
use crate::session::preview::PreviewSlot;
use crate::traits::media_stream::MediaStream;
use crate::traits::preview_surface::PreviewSurface;
use crate::traits::session_delegate::SessionDelegate;

pub(crate) fn stream_info(id: &str) -> StreamInfo {
    StreamInfo {
        id: id.to_string(),
        tracks: vec![
            TrackInfo {
                id: format!("{}-video", id),
                kind: TrackKind::Video,
                label: "Mock Camera".into(),
            },
            TrackInfo {
                id: format!("{}-audio", id),
                kind: TrackKind::Audio,
                label: "Mock Microphone".into(),
            },
        ],
        video: None,
    }
}

#[derive(Default)]
struct ProbeState {
    live_tracks: usize,
    stop_calls: usize,
    streams_opened: usize,
    encoders_created: usize,
    running_encoders: usize,
    callback: Option<ChunkCallback>,
    deny: bool,
    fail_create: bool,
    fail_stop: bool,
    hide_mime: bool,
    flush_on_stop: Vec<Vec<u8>>,
    supported: Option<Vec<String>>,
    last_options: Option<EncoderOptions>,
}

/// Shared view into everything the mock devices did.
#[derive(Clone, Default)]
pub(crate) struct MockProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl MockProbe {
    pub fn new() -> Self {
        let probe = Self::default();
        probe.state.lock().supported = Some(vec!["video/webm;codecs=vp9,opus".into(), "video/webm".into()]);
        probe
    }

    pub fn live_tracks(&self) -> usize {
        self.state.lock().live_tracks
    }

    pub fn stop_calls(&self) -> usize {
        self.state.lock().stop_calls
    }

    pub fn streams_opened(&self) -> usize {
        self.state.lock().streams_opened
    }

    pub fn encoders_created(&self) -> usize {
        self.state.lock().encoders_created
    }

    pub fn running_encoders(&self) -> usize {
        self.state.lock().running_encoders
    }

    pub fn last_options(&self) -> Option<EncoderOptions> {
        self.state.lock().last_options.clone()
    }

    pub fn deny(&self, deny: bool) {
        self.state.lock().deny = deny;
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    pub fn fail_stop(&self, fail: bool) {
        self.state.lock().fail_stop = fail;
    }

    pub fn hide_mime(&self, hide: bool) {
        self.state.lock().hide_mime = hide;
    }

    pub fn flush_on_stop(&self, chunk: &[u8]) {
        self.state.lock().flush_on_stop.push(chunk.to_vec());
    }

    pub fn set_supported(&self, supported: Option<&[&str]>) {
        self.state.lock().supported = supported.map(|s| s.iter().map(|m| m.to_string()).collect());
    }

    /// The callback handed to the most recently started encoder.
    pub fn callback(&self) -> Option<ChunkCallback> {
        self.state.lock().callback.clone()
    }

    /// Deliver a chunk through the running encoder's callback.
    pub fn emit(&self, chunk: &[u8]) {
        let callback = self.state.lock().callback.clone();
        if let Some(callback) = callback {
            callback(chunk);
        }
    }
}

pub(crate) struct MockStream {
    probe: MockProbe,
    id: String,
    live: usize,
}

impl MockStream {
    pub fn open(probe: &MockProbe) -> Self {
        let mut s = probe.state.lock();
        s.streams_opened += 1;
        s.live_tracks += 2;
        let id = format!("stream-{}", s.streams_opened);
        drop(s);
        Self {
            probe: probe.clone(),
            id,
            live: 2,
        }
    }
}

impl MediaStream for MockStream {
    fn info(&self) -> StreamInfo {
        stream_info(&self.id)
    }

    fn stop_all_tracks(&mut self) {
        let mut s = self.probe.state.lock();
        s.stop_calls += 1;
        s.live_tracks -= self.live;
        self.live = 0;
    }

    fn live_track_count(&self) -> usize {
        self.live
    }
}

pub(crate) struct MockEncoder {
    probe: MockProbe,
    mime_type: String,
    running: bool,
}

impl MediaEncoder for MockEncoder {
    fn start(&mut self, on_chunk: ChunkCallback) -> Result<(), CaptureError> {
        if self.running {
            return Err(CaptureError::InvalidState("mock encoder already running".into()));
        }
        self.running = true;
        let mut s = self.probe.state.lock();
        s.callback = Some(on_chunk);
        s.running_encoders += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.running {
            return Err(CaptureError::InvalidState("mock encoder not running".into()));
        }
        self.running = false;
        let (callback, flush, fail) = {
            let mut s = self.probe.state.lock();
            s.running_encoders -= 1;
            (s.callback.take(), std::mem::take(&mut s.flush_on_stop), s.fail_stop)
        };
        if let Some(callback) = callback {
            for chunk in &flush {
                callback(chunk);
            }
        }
        if fail {
            return Err(CaptureError::EncodingFailed("mock stop fault".into()));
        }
        Ok(())
    }

    fn mime_type(&self) -> Option<String> {
        if self.probe.state.lock().hide_mime {
            None
        } else {
            Some(self.mime_type.clone())
        }
    }
}

pub(crate) struct MockDevices {
    probe: MockProbe,
}

impl MockDevices {
    pub fn new(probe: &MockProbe) -> Self {
        Self { probe: probe.clone() }
    }
}

impl CaptureBackend for MockDevices {
    type Stream = MockStream;
    type Encoder = MockEncoder;

    fn request_stream(&mut self, _constraints: &StreamConstraints) -> Result<MockStream, CaptureError> {
        if self.probe.state.lock().deny {
            return Err(CaptureError::PermissionDenied);
        }
        Ok(MockStream::open(&self.probe))
    }

    fn is_type_supported(&self, mime_type: &str) -> Option<bool> {
        self.probe
            .state
            .lock()
            .supported
            .as_ref()
            .map(|s| s.iter().any(|m| m == mime_type))
    }

    fn create_encoder(&mut self, _stream: &MockStream, options: &EncoderOptions) -> Result<MockEncoder, CaptureError> {
        let mut s = self.probe.state.lock();
        if s.fail_create {
            return Err(CaptureError::EncodingFailed("mock encoder refused".into()));
        }
        s.encoders_created += 1;
        s.last_options = Some(options.clone());
        Ok(MockEncoder {
            probe: self.probe.clone(),
            mime_type: options.mime_type.clone(),
            running: false,
        })
    }
}

/// Preview surface that logs every call.
pub(crate) struct RecordingSurface {
    events: Arc<Mutex<Vec<String>>>,
    fail_play: bool,
}

impl RecordingSurface {
    pub fn new(fail_play: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
                fail_play,
            },
            events,
        )
    }
}

impl PreviewSurface for RecordingSurface {
    fn attach(&mut self, stream: &StreamInfo) -> Result<(), CaptureError> {
        self.events.lock().push(format!("attach:{}", stream.id));
        Ok(())
    }

    fn play(&mut self) -> Result<(), CaptureError> {
        self.events.lock().push("play".into());
        if self.fail_play {
            return Err(CaptureError::PreviewFailed("autoplay blocked".into()));
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.events.lock().push("detach".into());
    }
}

/// Preview surface holding a handle to its own slot, reading it from inside
/// every callback. Optionally unbinds itself when detached.
pub(crate) struct SlotAwareSurface {
    slot: PreviewSlot,
    seen: Arc<Mutex<Vec<(String, bool)>>>,
    unbind_on_detach: bool,
}

impl SlotAwareSurface {
    pub fn new(slot: &PreviewSlot, unbind_on_detach: bool) -> (Self, Arc<Mutex<Vec<(String, bool)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                slot: slot.clone(),
                seen: Arc::clone(&seen),
                unbind_on_detach,
            },
            seen,
        )
    }
}

impl PreviewSurface for SlotAwareSurface {
    fn attach(&mut self, stream: &StreamInfo) -> Result<(), CaptureError> {
        self.seen.lock().push((format!("attach:{}", stream.id), self.slot.is_attached()));
        Ok(())
    }

    fn play(&mut self) -> Result<(), CaptureError> {
        self.seen.lock().push(("play".into(), self.slot.is_attached()));
        Ok(())
    }

    fn detach(&mut self) {
        self.seen.lock().push(("detach".into(), self.slot.is_attached()));
        if self.unbind_on_detach {
            self.slot.unbind();
        }
    }
}

#[derive(Default)]
pub(crate) struct EventLog {
    pub phases: Mutex<Vec<SessionPhase>>,
    pub permissions: Mutex<Vec<PermissionState>>,
    pub warnings: Mutex<Vec<CaptureError>>,
    pub artifacts: Mutex<Vec<usize>>,
}

impl SessionDelegate for EventLog {
    fn on_phase_changed(&self, phase: SessionPhase) {
        self.phases.lock().push(phase);
    }

    fn on_permission_changed(&self, permission: PermissionState) {
        self.permissions.lock().push(permission);
    }

    fn on_warning(&self, error: &CaptureError) {
        self.warnings.lock().push(error.clone());
    }

    fn on_artifact_ready(&self, artifact: &Artifact) {
        self.artifacts.lock().push(artifact.size());
    }
}
