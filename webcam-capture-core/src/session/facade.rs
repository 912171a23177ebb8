use std::sync::Arc;

use crate::models::artifact::Artifact;
use crate::models::config::RecorderConfiguration;
use crate::models::error::CaptureError;
use crate::models::state::{PermissionState, SessionPhase};
use crate::session::preview::PreviewSlot;
use crate::session::recorder::{CaptureSession, SessionDiagnostics};
use crate::traits::capture_backend::CaptureBackend;
use crate::traits::capture_session::RecordingSession;
use crate::traits::session_delegate::SessionDelegate;

/// Webcam recorder used by game screens.
///
/// Wraps a [`CaptureSession`] and flattens its errors into the boolean /
/// optional results a screen branches on. Dropping the recorder tears the
/// session down.
///
/// ```ignore
/// let mut recorder = WebcamRecorder::new(backend)?;
/// if recorder.start() {
///     // ... game runs, then its timer or the stop button fires ...
///     let artifact = recorder.stop();
/// }
/// ```
pub struct WebcamRecorder<B: CaptureBackend> {
    session: CaptureSession<B>,
}

impl<B: CaptureBackend> WebcamRecorder<B> {
    pub fn new(backend: B) -> Result<Self, CaptureError> {
        Self::with_config(backend, RecorderConfiguration::default())
    }

    pub fn with_config(backend: B, config: RecorderConfiguration) -> Result<Self, CaptureError> {
        Ok(Self {
            session: CaptureSession::new(backend, config)?,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.session.set_delegate(delegate);
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.session.diagnostics()
    }

    pub fn live_track_count(&self) -> usize {
        self.session.live_track_count()
    }

    pub fn session(&self) -> &CaptureSession<B> {
        &self.session
    }
}

impl<B: CaptureBackend> RecordingSession for WebcamRecorder<B> {
    fn preview(&self) -> PreviewSlot {
        self.session.preview()
    }

    fn permission(&self) -> PermissionState {
        self.session.permission()
    }

    fn is_recording(&self) -> bool {
        self.session.phase().is_recording()
    }

    fn setup(&mut self) -> bool {
        match self.session.acquire() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Webcam setup failed: {}", e);
                false
            }
        }
    }

    fn start(&mut self) -> bool {
        match self.session.start() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Recording did not start: {}", e);
                false
            }
        }
    }

    fn stop(&mut self) -> Option<Artifact> {
        self.session.stop()
    }

    fn teardown(&mut self) {
        self.session.teardown();
    }
}
