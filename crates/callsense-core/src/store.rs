use crate::config::StoreConfig;
use crate::types::EmotionSample;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// The accumulated sample sequence for one (room, user) pair.
///
/// Samples are append-only and kept in arrival order.
#[derive(Debug, Clone)]
pub struct ParticipantSession {
    pub room_id: String,
    pub user_id: String,
    pub samples: Vec<EmotionSample>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParticipantSession {
    fn new(room_id: &str, user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            room_id: room_id.to_string(),
            user_id: user_id.to_string(),
            samples: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn push_sample(&mut self, sample: EmotionSample) {
        self.updated_at = Utc::now();
        self.samples.push(sample);
    }
}

#[derive(Debug)]
struct Room {
    participants: HashMap<String, ParticipantSession>,
    touched_at: DateTime<Utc>,
}

impl Room {
    fn new() -> Self {
        Self {
            participants: HashMap::new(),
            touched_at: Utc::now(),
        }
    }
}

/// In-memory registry of rooms and their participants' sample sequences.
///
/// Constructed once at startup and injected into request handlers; callers
/// wrap it in a lock for shared access. Entries are created lazily on first
/// reference and live until the optional TTL sweep evicts their room.
pub struct SessionStore {
    rooms: HashMap<String, Room>,
    room_ttl: Option<Duration>,
}

impl SessionStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            rooms: HashMap::new(),
            room_ttl: config.room_ttl_secs.map(|s| Duration::seconds(s as i64)),
        }
    }

    /// Ensure the room and the participant's sample sequence exist.
    ///
    /// Idempotent: joining a room the participant is already in leaves the
    /// recorded samples untouched.
    pub fn join(&mut self, room_id: &str, user_id: &str) {
        let room = self.rooms.entry(room_id.to_string()).or_insert_with(Room::new);
        room.touched_at = Utc::now();
        room.participants
            .entry(user_id.to_string())
            .or_insert_with(|| ParticipantSession::new(room_id, user_id));
    }

    /// Append a sample, creating the room and participant entries if absent.
    pub fn record_sample(&mut self, room_id: &str, user_id: &str, sample: EmotionSample) {
        let room = self.rooms.entry(room_id.to_string()).or_insert_with(Room::new);
        room.touched_at = Utc::now();
        room.participants
            .entry(user_id.to_string())
            .or_insert_with(|| ParticipantSession::new(room_id, user_id))
            .push_sample(sample);
    }

    /// Look up a participant's session, if one was ever recorded.
    ///
    /// `None` means the pair was never referenced — distinct from a session
    /// that exists with zero samples.
    pub fn session(&self, room_id: &str, user_id: &str) -> Option<&ParticipantSession> {
        self.rooms
            .get(room_id)
            .and_then(|room| room.participants.get(user_id))
    }

    /// Drop rooms idle longer than the configured TTL. Returns the number of
    /// rooms evicted. No-op when no TTL is configured.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.room_ttl else {
            return 0;
        };
        let before = self.rooms.len();
        self.rooms.retain(|room_id, room| {
            let keep = now - room.touched_at <= ttl;
            if !keep {
                tracing::debug!("Evicting idle room {}", room_id);
            }
            keep
        });
        before - self.rooms.len()
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Participants in a room (empty if the room doesn't exist).
    pub fn participant_count(&self, room_id: &str) -> usize {
        self.rooms
            .get(room_id)
            .map(|room| room.participants.len())
            .unwrap_or(0)
    }
}
