use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single emotion/eye-contact observation captured during a call.
///
/// Immutable once recorded; the timestamp is assigned server-side when the
/// sample is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionSample {
    /// Free-form emotion label as reported by the client detector.
    pub emotion: String,
    /// Whether the participant was looking at the camera when sampled.
    pub eye_contact: bool,
    pub timestamp: DateTime<Utc>,
}

impl EmotionSample {
    pub fn new(emotion: impl Into<String>, eye_contact: bool) -> Self {
        Self {
            emotion: emotion.into(),
            eye_contact,
            timestamp: Utc::now(),
        }
    }
}

/// Short random token used for room and user identifiers (UUIDv4 prefix).
pub fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_length() {
        let id = short_id();
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn test_short_ids_are_distinct() {
        assert_ne!(short_id(), short_id());
    }

    #[test]
    fn test_sample_serializes_timestamp_rfc3339() {
        let sample = EmotionSample::new("happy", true);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["emotion"], "happy");
        assert_eq!(json["eye_contact"], true);
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.contains('T'));
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
