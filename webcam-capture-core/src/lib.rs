//! # webcam-capture-core
//!
//! Platform-agnostic webcam capture core library.
//!
//! Acquires a combined camera + microphone stream, drives an encoder across
//! one recording, buffers its chunks in arrival order, and turns them into a
//! single artifact. Every exit path (stop, teardown, encoder fault, drop)
//! releases the device tracks exactly once.
//!
//! Platform backends implement [`CaptureBackend`] and plug into the generic
//! [`CaptureSession`]. Game screens talk to the [`WebcamRecorder`] façade
//! through the [`RecordingSession`] trait.
//!
//! ## Architecture
//!
//! ```text
//! webcam-capture-core (this crate)
//! ├── traits/       ← CaptureBackend, MediaStream, MediaEncoder, PreviewSurface, SessionDelegate, RecordingSession
//! ├── models/       ← CaptureError, PermissionState, SessionPhase, RecorderConfiguration, Artifact, SessionMetadata
//! ├── processing/   ← ChunkBuffer, mime type selection
//! ├── session/      ← DeviceAcquisition, CaptureSession, finalizer, WebcamRecorder
//! ├── storage/      ← artifact + metadata export
//! └── schedule/     ← Countdown, PhaseScheduler (game-side timing)
//! ```

pub mod models;
pub mod processing;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::artifact::{Artifact, SessionOutcome};
pub use models::config::RecorderConfiguration;
pub use models::error::CaptureError;
pub use models::media::{EncoderOptions, StreamConstraints, StreamInfo, TrackInfo, TrackKind, VideoSettings};
pub use models::metadata::SessionMetadata;
pub use models::state::{PermissionState, SessionPhase};
pub use processing::chunk_buffer::ChunkBuffer;
pub use schedule::countdown::{Countdown, CountdownEvent};
pub use schedule::phases::{GamePhase, PhaseScheduler};
pub use session::facade::WebcamRecorder;
pub use session::preview::PreviewSlot;
pub use session::recorder::{CaptureSession, SessionDiagnostics};
pub use storage::export::{export_outcome, ExportedSession};
pub use traits::capture_backend::CaptureBackend;
pub use traits::capture_session::RecordingSession;
pub use traits::media_encoder::{ChunkCallback, MediaEncoder};
pub use traits::media_stream::MediaStream;
pub use traits::preview_surface::PreviewSurface;
pub use traits::session_delegate::SessionDelegate;
