pub mod acquisition;
pub mod device_stream;
pub mod facade;
pub mod finalizer;
pub mod preview;
pub mod recorder;

#[cfg(test)]
pub(crate) mod mock;
