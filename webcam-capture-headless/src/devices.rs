use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use webcam_capture_core::models::error::CaptureError;
use webcam_capture_core::models::media::{EncoderOptions, StreamConstraints, VideoSettings};
use webcam_capture_core::traits::capture_backend::CaptureBackend;

use crate::encoder::TestPatternEncoder;
use crate::stream::SyntheticStream;

/// How the synthetic platform answers a stream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    Grant,
    Deny,
    NoDevice,
    /// A camera exists but cannot satisfy the requested constraints.
    Overconstrained,
}

/// Shared counters standing in for the hardware in-use indicator.
#[derive(Debug, Clone, Default)]
pub struct DeviceMonitor {
    live_tracks: Arc<AtomicUsize>,
    streams_opened: Arc<AtomicUsize>,
}

impl DeviceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_tracks(&self) -> usize {
        self.live_tracks.load(Ordering::SeqCst)
    }

    pub fn streams_opened(&self) -> usize {
        self.streams_opened.load(Ordering::SeqCst)
    }

    /// Whether the camera/mic light would be on.
    pub fn is_in_use(&self) -> bool {
        self.live_tracks() > 0
    }

    pub(crate) fn track_started(&self) {
        self.live_tracks.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn track_stopped(&self) {
        self.live_tracks.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn stream_opened(&self) {
        self.streams_opened.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDeviceConfig {
    pub policy: AccessPolicy,
    /// Largest video the fake camera can deliver.
    pub max_width: u32,
    pub max_height: u32,
    pub max_frame_rate: u32,
    /// Mime types the encoder accepts; `None` makes support unqueryable.
    pub supported_mime_types: Option<Vec<String>>,
    /// Whether the encoder reports the mime type it negotiated.
    pub report_mime_type: bool,
    /// Interval between emitted chunks.
    pub timeslice: Duration,
    /// Payload bytes per chunk, excluding the 8-byte header.
    pub chunk_size: usize,
}

impl Default for SyntheticDeviceConfig {
    fn default() -> Self {
        Self {
            policy: AccessPolicy::Grant,
            max_width: 1920,
            max_height: 1080,
            max_frame_rate: 30,
            supported_mime_types: Some(vec![
                "video/webm;codecs=vp8,opus".into(),
                "video/webm".into(),
            ]),
            report_mime_type: true,
            timeslice: Duration::from_millis(100),
            chunk_size: 1024,
        }
    }
}

/// A `CaptureBackend` backed by a fake camera and microphone.
pub struct SyntheticDevices {
    config: SyntheticDeviceConfig,
    monitor: DeviceMonitor,
}

impl SyntheticDevices {
    pub fn new(config: SyntheticDeviceConfig) -> Self {
        Self {
            config,
            monitor: DeviceMonitor::new(),
        }
    }

    /// Handle for observing track activity after the backend is moved into a
    /// session.
    pub fn monitor(&self) -> DeviceMonitor {
        self.monitor.clone()
    }

    pub fn config(&self) -> &SyntheticDeviceConfig {
        &self.config
    }

    /// Change how the next stream request is answered.
    pub fn set_policy(&mut self, policy: AccessPolicy) {
        self.config.policy = policy;
    }

    fn negotiate(&self, constraints: &StreamConstraints) -> VideoSettings {
        VideoSettings {
            width: constraints.width.min(self.config.max_width),
            height: constraints.height.min(self.config.max_height),
            frame_rate: constraints.frame_rate.min(self.config.max_frame_rate) as f64,
        }
    }
}

impl Default for SyntheticDevices {
    fn default() -> Self {
        Self::new(SyntheticDeviceConfig::default())
    }
}

impl CaptureBackend for SyntheticDevices {
    type Stream = SyntheticStream;
    type Encoder = TestPatternEncoder;

    fn request_stream(&mut self, constraints: &StreamConstraints) -> Result<SyntheticStream, CaptureError> {
        match self.config.policy {
            AccessPolicy::Deny => return Err(CaptureError::PermissionDenied),
            AccessPolicy::NoDevice => return Err(CaptureError::DeviceNotAvailable),
            AccessPolicy::Overconstrained => {
                return Err(CaptureError::ConstraintsUnsatisfiable(format!(
                    "no camera mode close to {}x{} @ {} fps",
                    constraints.width, constraints.height, constraints.frame_rate
                )))
            }
            AccessPolicy::Grant => {}
        }

        let settings = self.negotiate(constraints);
        log::debug!(
            "Synthetic camera granted {}x{} @ {} fps",
            settings.width,
            settings.height,
            settings.frame_rate
        );
        Ok(SyntheticStream::open(settings, constraints.audio, self.monitor.clone()))
    }

    fn is_type_supported(&self, mime_type: &str) -> Option<bool> {
        self.config
            .supported_mime_types
            .as_ref()
            .map(|types| types.iter().any(|t| t.eq_ignore_ascii_case(mime_type)))
    }

    fn create_encoder(
        &mut self,
        stream: &SyntheticStream,
        options: &EncoderOptions,
    ) -> Result<TestPatternEncoder, CaptureError> {
        if self.is_type_supported(&options.mime_type) == Some(false) {
            return Err(CaptureError::EncodingFailed(format!(
                "unsupported mime type: {}",
                options.mime_type
            )));
        }
        if !stream.video_live().load(Ordering::SeqCst) {
            return Err(CaptureError::InvalidState("stream has no live video track".into()));
        }

        let negotiated = self.config.report_mime_type.then(|| options.mime_type.clone());
        Ok(TestPatternEncoder::new(
            stream.video_live(),
            negotiated,
            self.config.timeslice,
            self.config.chunk_size,
        ))
    }
}
