use std::sync::Arc;

use crate::models::error::CaptureError;

/// Callback invoked once per encoded chunk, in production order.
///
/// Fires on the encoder's own thread; keep the work minimal.
pub type ChunkCallback = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// An encoder bound to one device stream for the span of one recording.
pub trait MediaEncoder: Send {
    /// Begin encoding, delivering chunks via `on_chunk`.
    fn start(&mut self, on_chunk: ChunkCallback) -> Result<(), CaptureError>;

    /// Stop encoding and wait for the acknowledgement.
    ///
    /// Every chunk produced by this encoder must have been delivered before
    /// this returns. Calling it on a stopped encoder returns an error.
    fn stop(&mut self) -> Result<(), CaptureError>;

    /// Mime type the encoder actually negotiated, if it reports one.
    fn mime_type(&self) -> Option<String>;
}
