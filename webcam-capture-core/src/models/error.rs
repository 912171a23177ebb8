use thiserror::Error;

/// Errors that can occur during webcam capture operations.
///
/// None of these are fatal: the session façade degrades every variant to a
/// `false`/`None` result or a logged warning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("constraints unsatisfiable: {0}")]
    ConstraintsUnsatisfiable(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("preview failed: {0}")]
    PreviewFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
