use crate::models::media::StreamInfo;

/// A live camera + microphone stream handed out by a [`CaptureBackend`].
///
/// While any track is live the device's in-use indicator stays on.
///
/// [`CaptureBackend`]: super::capture_backend::CaptureBackend
pub trait MediaStream: Send {
    /// Identity and track layout of this stream.
    fn info(&self) -> StreamInfo;

    /// Stop every track. Must be safe to call on an already-stopped stream.
    fn stop_all_tracks(&mut self);

    /// Number of tracks still delivering media.
    fn live_track_count(&self) -> usize;
}
