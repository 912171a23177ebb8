use crate::models::artifact::Artifact;
use crate::models::state::PermissionState;
use crate::session::preview::PreviewSlot;

/// The surface game screens record through.
///
/// Nothing here panics or returns an error: acquisition problems become
/// `false`, and `stop` always resolves.
pub trait RecordingSession {
    /// Slot a preview surface can be bound to. Leaving it empty is fine.
    fn preview(&self) -> PreviewSlot;

    /// Current permission state.
    fn permission(&self) -> PermissionState;

    /// Whether an encoder is currently running.
    fn is_recording(&self) -> bool;

    /// Acquire the camera and microphone. `true` if a stream is now held.
    fn setup(&mut self) -> bool;

    /// Begin a recording, acquiring first if needed. `true` if it began.
    fn start(&mut self) -> bool;

    /// Stop the recording and release the devices.
    fn stop(&mut self) -> Option<Artifact>;

    /// Abandon everything: stop, release, discard buffered output.
    fn teardown(&mut self);
}
