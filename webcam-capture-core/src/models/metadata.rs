use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const GAME: &str = "game";
pub const CHILD_ID: &str = "childId";
pub const GROUP: &str = "group";
pub const AGE: &str = "age";
pub const NOTE: &str = "note";
pub const SCORE: &str = "score";
pub const TIMESTAMP: &str = "timestamp";
pub const DURATION_SEC: &str = "durationSec";

/// Free-form key/value record describing one session.
///
/// Assembled by the caller (game name, subject id, age, group, score...) and
/// serialized as a flat JSON object in insertion order. The capture core
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionMetadata(Map<String, Value>);

impl SessionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_game(game: &str) -> Self {
        Self::new().with(GAME, game)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String rendering of a field; numbers and booleans are stringified.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Epoch milliseconds stamped by [`SessionMetadata::finish`].
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.get(TIMESTAMP).and_then(Value::as_i64)
    }

    /// Stamps the session end time and, when a start time is known, the
    /// duration in whole seconds (rounded, never negative).
    pub fn finish(mut self, started_at: Option<DateTime<Utc>>, ended_at: DateTime<Utc>) -> Self {
        self.insert(TIMESTAMP, ended_at.timestamp_millis());
        if let Some(start) = started_at {
            let millis = (ended_at - start).num_milliseconds();
            let secs = (millis as f64 / 1000.0).round().max(0.0) as u64;
            self.insert(DURATION_SEC, secs);
        }
        self
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
