use crate::models::error::CaptureError;
use crate::models::media::{EncoderOptions, StreamConstraints, StreamInfo};
use crate::models::state::PermissionState;
use crate::session::device_stream::DeviceStream;
use crate::session::finalizer::ReleaseGuard;
use crate::session::preview::PreviewSlot;
use crate::traits::capture_backend::CaptureBackend;

/// What a successful acquisition produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    pub stream: StreamInfo,
    /// Set when the preview could not be attached or played. Not a failure.
    pub preview_warning: Option<CaptureError>,
}

/// Requests device streams from a backend and holds at most one of them.
///
/// Owns the permission state: each acquisition attempt sets it to granted or
/// denied, and nothing else touches it.
pub struct DeviceAcquisition<B: CaptureBackend> {
    backend: B,
    constraints: StreamConstraints,
    permission: PermissionState,
    stream: Option<DeviceStream<B::Stream>>,
    preview: PreviewSlot,
}

impl<B: CaptureBackend> DeviceAcquisition<B> {
    pub fn new(backend: B, constraints: StreamConstraints, preview: PreviewSlot) -> Self {
        Self {
            backend,
            constraints,
            permission: PermissionState::Unrequested,
            stream: None,
            preview,
        }
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn constraints(&self) -> &StreamConstraints {
        &self.constraints
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn stream(&self) -> Option<&DeviceStream<B::Stream>> {
        self.stream.as_ref()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Request a stream, replacing (and first releasing) any stream already
    /// held.
    ///
    /// The preview, if one is bound, is attached and played on a best-effort
    /// basis; problems there come back as `preview_warning` and leave the
    /// permission granted.
    pub fn acquire(&mut self) -> Result<Acquired, CaptureError> {
        if self.release() {
            log::info!("Released previous device stream before re-acquiring");
        }

        log::info!(
            "Requesting camera/microphone stream (ideal {}x{} @ {} fps, audio: {})",
            self.constraints.width,
            self.constraints.height,
            self.constraints.frame_rate,
            self.constraints.audio
        );

        let stream = match self.backend.request_stream(&self.constraints) {
            Ok(stream) => DeviceStream::new(stream),
            Err(e) => {
                log::error!("Webcam permission error: {}", e);
                self.permission = PermissionState::Denied;
                return Err(e);
            }
        };

        self.permission = PermissionState::Granted;
        let info = stream.info().clone();
        self.stream = Some(stream);

        let preview_warning = match self.preview.show(&info) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Video preview play prevented: {}", e);
                Some(e)
            }
        };

        Ok(Acquired {
            stream: info,
            preview_warning,
        })
    }

    /// Create an encoder reading from the held stream.
    pub fn create_encoder(&mut self, options: &EncoderOptions) -> Result<B::Encoder, CaptureError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| CaptureError::InvalidState("no device stream held".into()))?;
        self.backend.create_encoder(stream.stream(), options)
    }

    /// Hand the held stream over, wrapped with the preview in a guard.
    pub fn take_release_guard(&mut self) -> ReleaseGuard<B::Stream> {
        ReleaseGuard::new(self.stream.take(), self.preview.clone())
    }

    /// Stop the held stream's tracks and detach the preview.
    ///
    /// Returns `true` if a live stream was stopped.
    pub fn release(&mut self) -> bool {
        self.take_release_guard().release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{MockDevices, MockProbe, RecordingSurface};

    fn acquisition(probe: &MockProbe) -> DeviceAcquisition<MockDevices> {
        DeviceAcquisition::new(MockDevices::new(probe), StreamConstraints::default(), PreviewSlot::new())
    }

    #[test]
    fn success_grants_permission() {
        let probe = MockProbe::new();
        let mut devices = acquisition(&probe);
        assert_eq!(devices.permission(), PermissionState::Unrequested);

        let acquired = devices.acquire().unwrap();
        assert_eq!(devices.permission(), PermissionState::Granted);
        assert!(acquired.stream.has_video());
        assert!(acquired.preview_warning.is_none());
        assert_eq!(probe.live_tracks(), 2);
    }

    #[test]
    fn refusal_denies_permission() {
        let probe = MockProbe::new();
        probe.deny(true);
        let mut devices = acquisition(&probe);

        assert_eq!(devices.acquire(), Err(CaptureError::PermissionDenied));
        assert_eq!(devices.permission(), PermissionState::Denied);
        assert!(!devices.has_stream());
    }

    #[test]
    fn reacquire_replaces_and_releases_previous() {
        let probe = MockProbe::new();
        let mut devices = acquisition(&probe);

        devices.acquire().unwrap();
        devices.acquire().unwrap();
        devices.acquire().unwrap();

        assert_eq!(probe.streams_opened(), 3);
        assert_eq!(probe.live_tracks(), 2);
    }

    #[test]
    fn failed_reacquire_leaves_nothing_live() {
        let probe = MockProbe::new();
        let mut devices = acquisition(&probe);
        devices.acquire().unwrap();

        probe.deny(true);
        assert!(devices.acquire().is_err());
        assert_eq!(probe.live_tracks(), 0);
        assert_eq!(devices.permission(), PermissionState::Denied);
    }

    #[test]
    fn preview_failure_keeps_permission_granted() {
        let probe = MockProbe::new();
        let (surface, _events) = RecordingSurface::new(true);
        let preview = PreviewSlot::new();
        preview.bind(Box::new(surface));
        let mut devices = DeviceAcquisition::new(MockDevices::new(&probe), StreamConstraints::default(), preview);

        let acquired = devices.acquire().unwrap();
        assert!(matches!(acquired.preview_warning, Some(CaptureError::PreviewFailed(_))));
        assert_eq!(devices.permission(), PermissionState::Granted);
        assert!(devices.has_stream());
    }

    #[test]
    fn create_encoder_requires_stream() {
        let probe = MockProbe::new();
        let mut devices = acquisition(&probe);
        let options = EncoderOptions {
            mime_type: "video/webm".into(),
            video_bits_per_second: 1,
        };
        assert!(matches!(devices.create_encoder(&options), Err(CaptureError::InvalidState(_))));
    }
}
