use crate::models::media::StreamInfo;
use crate::traits::media_stream::MediaStream;

/// Exclusive owner of one acquired device stream.
///
/// Stops every track exactly once: on an explicit [`DeviceStream::release`]
/// or, failing that, when dropped. There is no way to get the stream out
/// without going through this guard.
pub struct DeviceStream<S: MediaStream> {
    stream: S,
    info: StreamInfo,
    released: bool,
}

impl<S: MediaStream> DeviceStream<S> {
    pub fn new(stream: S) -> Self {
        let info = stream.info();
        Self {
            stream,
            info,
            released: false,
        }
    }

    pub fn info(&self) -> &StreamInfo {
        &self.info
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn live_track_count(&self) -> usize {
        self.stream.live_track_count()
    }

    /// Stop all tracks. Returns `true` only for the call that did the work.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.stream.stop_all_tracks();
        log::debug!(
            "Released device stream {} ({} tracks)",
            self.info.id,
            self.info.tracks.len()
        );
        true
    }
}

impl<S: MediaStream> Drop for DeviceStream<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{MockProbe, MockStream};

    #[test]
    fn release_stops_tracks_once() {
        let probe = MockProbe::new();
        let mut guard = DeviceStream::new(MockStream::open(&probe));
        assert_eq!(probe.live_tracks(), 2);

        assert!(guard.release());
        assert!(!guard.release());
        assert_eq!(probe.live_tracks(), 0);
        assert_eq!(probe.stop_calls(), 1);
    }

    #[test]
    fn drop_releases() {
        let probe = MockProbe::new();
        {
            let _guard = DeviceStream::new(MockStream::open(&probe));
            assert_eq!(probe.live_tracks(), 2);
        }
        assert_eq!(probe.live_tracks(), 0);
    }

    #[test]
    fn drop_after_release_does_not_stop_again() {
        let probe = MockProbe::new();
        let mut guard = DeviceStream::new(MockStream::open(&probe));
        guard.release();
        drop(guard);
        assert_eq!(probe.stop_calls(), 1);
    }
}
