pub mod capture_backend;
pub mod capture_session;
pub mod media_encoder;
pub mod media_stream;
pub mod preview_surface;
pub mod session_delegate;
