use super::media::{EncoderOptions, StreamConstraints};

/// Preferred container/codec descriptors, best first.
pub const DEFAULT_MIME_CANDIDATES: [&str; 3] = [
    "video/webm;codecs=vp9,opus",
    "video/webm;codecs=vp8,opus",
    "video/webm",
];

/// Mime type used when no candidate can be confirmed and when the encoder
/// does not report what it negotiated.
pub const FALLBACK_MIME_TYPE: &str = "video/webm";

/// Configuration for a webcam capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderConfiguration {
    /// Ideal capture width in pixels (default: 1280).
    pub width: u32,

    /// Ideal capture height in pixels (default: 720).
    pub height: u32,

    /// Ideal frame rate (default: 30).
    pub frame_rate: u32,

    /// Request a microphone track alongside the camera (default: true).
    pub enable_audio: bool,

    /// Target video bitrate handed to the encoder (default: 4 Mbps).
    pub video_bits_per_second: u32,

    /// Mime descriptors probed in order when a recording starts.
    pub mime_candidates: Vec<String>,

    /// Mime type used when probing finds nothing or the encoder reports none.
    pub fallback_mime_type: String,
}

impl RecorderConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("invalid resolution: {}x{}", self.width, self.height));
        }
        if self.frame_rate == 0 {
            return Err("frame rate must be positive".into());
        }
        if self.video_bits_per_second == 0 {
            return Err("video bitrate must be positive".into());
        }
        if self.fallback_mime_type.trim().is_empty() {
            return Err("fallback mime type must not be empty".into());
        }
        Ok(())
    }

    pub fn constraints(&self) -> StreamConstraints {
        StreamConstraints {
            width: self.width,
            height: self.height,
            frame_rate: self.frame_rate,
            audio: self.enable_audio,
        }
    }

    pub fn encoder_options(&self, mime_type: String) -> EncoderOptions {
        EncoderOptions {
            mime_type,
            video_bits_per_second: self.video_bits_per_second,
        }
    }
}

impl Default for RecorderConfiguration {
    fn default() -> Self {
        let constraints = StreamConstraints::default();
        Self {
            width: constraints.width,
            height: constraints.height,
            frame_rate: constraints.frame_rate,
            enable_audio: constraints.audio,
            video_bits_per_second: 4_000_000,
            mime_candidates: DEFAULT_MIME_CANDIDATES.iter().map(|m| m.to_string()).collect(),
            fallback_mime_type: FALLBACK_MIME_TYPE.to_string(),
        }
    }
}
