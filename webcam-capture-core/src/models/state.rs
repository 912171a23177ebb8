use serde::{Deserialize, Serialize};

/// Whether camera/microphone access was ever requested, and how it went.
///
/// Only an acquisition attempt changes this. A preview that fails to play is
/// not a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Unrequested,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unrequested => "unrequested",
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle/denied → acquiring → ready → recording → finalizing → idle
///                   ↓
///                 denied
/// ```
/// Forced teardown returns any state to `idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Acquiring,
    Ready,
    Recording,
    Finalizing,
    Denied,
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    /// Whether an acquisition may begin from this phase.
    pub fn can_acquire(&self) -> bool {
        matches!(self, Self::Idle | Self::Denied | Self::Ready)
    }

    /// Whether an encoder is (or is about to be) bound to the stream.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Recording | Self::Finalizing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::Ready => "ready",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
            Self::Denied => "denied",
        }
    }
}
