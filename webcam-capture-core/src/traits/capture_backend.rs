use crate::models::error::CaptureError;
use crate::models::media::{EncoderOptions, StreamConstraints};
use crate::traits::media_encoder::MediaEncoder;
use crate::traits::media_stream::MediaStream;

/// Interface for platform-specific camera/microphone access.
///
/// Implemented by:
/// - `SyntheticDevices` (headless test-pattern backend)
/// - Future: browser `getUserMedia`/`MediaRecorder` bridge, native camera APIs
pub trait CaptureBackend: Send {
    type Stream: MediaStream;
    type Encoder: MediaEncoder;

    /// Request a combined audio + video stream.
    ///
    /// Blocks until the platform grants or refuses access. Constraint values
    /// are ideals; a backend should return the closest stream it can rather
    /// than fail.
    fn request_stream(&mut self, constraints: &StreamConstraints) -> Result<Self::Stream, CaptureError>;

    /// Whether the encoder can produce `mime_type`.
    ///
    /// `None` means the platform cannot answer the question at all.
    fn is_type_supported(&self, mime_type: &str) -> Option<bool>;

    /// Create an encoder reading from `stream`. The encoder is not started.
    fn create_encoder(
        &mut self,
        stream: &Self::Stream,
        options: &EncoderOptions,
    ) -> Result<Self::Encoder, CaptureError>;
}
