use crate::models::error::CaptureError;
use crate::models::media::StreamInfo;

/// Somewhere a live stream can be shown (a video element, a window, a
/// texture). Entirely optional: sessions record fine without one.
pub trait PreviewSurface: Send {
    /// Point the surface at `stream`.
    fn attach(&mut self, stream: &StreamInfo) -> Result<(), CaptureError>;

    /// Start playback. Platforms may refuse (autoplay policy and the like).
    fn play(&mut self) -> Result<(), CaptureError>;

    /// Drop any reference to the current stream.
    fn detach(&mut self);
}
