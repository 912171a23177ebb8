use crate::models::artifact::Artifact;
use crate::models::error::CaptureError;
use crate::models::state::{PermissionState, SessionPhase};

/// Event delegate for capture session notifications.
///
/// Phase and permission events fire on the caller's thread, from inside the
/// session operation that caused them.
pub trait SessionDelegate: Send + Sync {
    /// Called when the session phase changes.
    fn on_phase_changed(&self, phase: SessionPhase);

    /// Called after every acquisition attempt.
    fn on_permission_changed(&self, permission: PermissionState);

    /// Called for non-fatal problems (preview refused to play, encoder stop
    /// fault) that were recovered locally.
    fn on_warning(&self, error: &CaptureError);

    /// Called when a recording is finalized into an artifact.
    fn on_artifact_ready(&self, artifact: &Artifact);
}
