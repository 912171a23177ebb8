//! # webcam-capture-headless
//!
//! Synthetic in-process backend for webcam-capture-kit.
//!
//! Provides:
//! - `SyntheticDevices`: a `CaptureBackend` whose camera grants, refuses, or
//!   is missing on demand
//! - `SyntheticStream`: camera + microphone tracks wired to a shared
//!   `DeviceMonitor` (the "camera in use" light)
//! - `TestPatternEncoder`: emits numbered chunks on a worker thread and
//!   flushes a final one before acknowledging stop
//!
//! Useful for headless runs and for exercising the capture session without
//! hardware.
//!
//! ## Usage
//! ```ignore
//! use webcam_capture_core::{RecordingSession, WebcamRecorder};
//! use webcam_capture_headless::SyntheticDevices;
//!
//! let devices = SyntheticDevices::default();
//! let monitor = devices.monitor();
//! let mut recorder = WebcamRecorder::new(devices).unwrap();
//! assert!(recorder.start());
//! let artifact = recorder.stop();
//! assert!(!monitor.is_in_use());
//! ```

pub mod devices;
pub mod encoder;
pub mod stream;

pub use devices::{AccessPolicy, DeviceMonitor, SyntheticDeviceConfig, SyntheticDevices};
pub use encoder::TestPatternEncoder;
pub use stream::SyntheticStream;
