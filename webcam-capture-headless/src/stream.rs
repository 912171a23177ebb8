use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use webcam_capture_core::models::media::{StreamInfo, TrackInfo, TrackKind, VideoSettings};
use webcam_capture_core::traits::media_stream::MediaStream;

use crate::devices::DeviceMonitor;

struct SyntheticTrack {
    info: TrackInfo,
    live: Arc<AtomicBool>,
}

/// Fake camera (and optional microphone) stream.
///
/// Each live track counts toward the shared [`DeviceMonitor`]. Stopping a
/// track twice is harmless.
pub struct SyntheticStream {
    id: String,
    tracks: Vec<SyntheticTrack>,
    video: VideoSettings,
    monitor: DeviceMonitor,
}

impl SyntheticStream {
    pub(crate) fn open(video: VideoSettings, audio: bool, monitor: DeviceMonitor) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        monitor.stream_opened();

        let mut kinds = vec![(TrackKind::Video, "Synthetic Camera")];
        if audio {
            kinds.push((TrackKind::Audio, "Synthetic Microphone"));
        }

        let tracks = kinds
            .into_iter()
            .map(|(kind, label)| {
                monitor.track_started();
                SyntheticTrack {
                    info: TrackInfo {
                        id: uuid::Uuid::new_v4().to_string(),
                        kind,
                        label: label.into(),
                    },
                    live: Arc::new(AtomicBool::new(true)),
                }
            })
            .collect();

        Self {
            id,
            tracks,
            video,
            monitor,
        }
    }

    /// Liveness flag of the video track, shared with encoders reading it.
    pub(crate) fn video_live(&self) -> Arc<AtomicBool> {
        self.tracks
            .iter()
            .find(|t| t.info.kind == TrackKind::Video)
            .map(|t| Arc::clone(&t.live))
            .unwrap_or_else(|| Arc::new(AtomicBool::new(false)))
    }
}

impl MediaStream for SyntheticStream {
    fn info(&self) -> StreamInfo {
        StreamInfo {
            id: self.id.clone(),
            tracks: self.tracks.iter().map(|t| t.info.clone()).collect(),
            video: Some(self.video),
        }
    }

    fn stop_all_tracks(&mut self) {
        for track in &self.tracks {
            if track.live.swap(false, Ordering::SeqCst) {
                self.monitor.track_stopped();
            }
        }
    }

    fn live_track_count(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.live.load(Ordering::SeqCst))
            .count()
    }
}

impl Drop for SyntheticStream {
    fn drop(&mut self) {
        // Real devices stop when their last handle goes away.
        self.stop_all_tracks();
    }
}
