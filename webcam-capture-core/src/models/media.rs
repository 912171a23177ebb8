use serde::{Deserialize, Serialize};

/// Kind of a live media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

/// A single track inside a device stream (e.g., front camera, built-in mic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub kind: TrackKind,
    pub label: String,
}

/// Video settings the device actually granted.
///
/// Constraints are requested as ideal values, so these may differ from what
/// was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoSettings {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

/// Description of an acquired device stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub id: String,
    pub tracks: Vec<TrackInfo>,
    pub video: Option<VideoSettings>,
}

impl StreamInfo {
    pub fn has_audio(&self) -> bool {
        self.tracks.iter().any(|t| t.kind == TrackKind::Audio)
    }

    pub fn has_video(&self) -> bool {
        self.tracks.iter().any(|t| t.kind == TrackKind::Video)
    }
}

/// Requested stream shape. Every value is an ideal, never a mandatory bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConstraints {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 30,
            audio: true,
        }
    }
}

/// Options handed to the backend when an encoder is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    pub mime_type: String,
    pub video_bits_per_second: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constraints_are_720p30_with_audio() {
        let c = StreamConstraints::default();
        assert_eq!((c.width, c.height, c.frame_rate), (1280, 720, 30));
        assert!(c.audio);
    }

    #[test]
    fn stream_info_reports_track_kinds() {
        let info = StreamInfo {
            id: "s".into(),
            tracks: vec![TrackInfo {
                id: "v".into(),
                kind: TrackKind::Video,
                label: "Camera".into(),
            }],
            video: None,
        };
        assert!(info.has_video());
        assert!(!info.has_audio());
    }

    #[test]
    fn track_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrackKind::Audio).unwrap(), "\"audio\"");
    }
}
