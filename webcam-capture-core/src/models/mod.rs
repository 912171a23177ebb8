pub mod artifact;
pub mod config;
pub mod error;
pub mod media;
pub mod metadata;
pub mod state;
