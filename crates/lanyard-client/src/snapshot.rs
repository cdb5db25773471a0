//! Presence data model.
//!
//! A [`PresenceSnapshot`] is the complete state of one subject as the
//! gateway reports it. Snapshots are replaced wholesale on every update and
//! handed to subscribers behind an `Arc`, so nothing downstream can patch
//! one in place.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// The tracked subject. Stamped by the client, never read from the wire.
    #[serde(default, skip_deserializing)]
    pub subject_id: String,
    #[serde(rename = "discord_status")]
    pub status: Status,
    /// Server order, never re-sorted.
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default, rename = "discord_user")]
    pub user: Option<User>,
    /// Raw listening record as sent by the server. See `view::media_session`.
    #[serde(default)]
    pub spotify: Option<SpotifyTrack>,
    #[serde(default)]
    pub listening_to_spotify: bool,
    #[serde(flatten)]
    pub presence_flags: PresenceFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    Idle,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Offline,
}

/// Which clients the subject is active on. Independent flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceFlags {
    #[serde(default, rename = "active_on_discord_desktop")]
    pub desktop: bool,
    #[serde(default, rename = "active_on_discord_mobile")]
    pub mobile: bool,
    #[serde(default, rename = "active_on_discord_web")]
    pub web: bool,
}

impl PresenceFlags {
    pub fn any(&self) -> bool {
        self.desktop || self.mobile || self.web
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub public_flags: u64,
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub timestamps: Option<TimeRange>,
    #[serde(default)]
    pub assets: Option<Assets>,
    #[serde(default)]
    pub emoji: Option<Emoji>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Activity discriminant. Values the client does not know are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Competing,
    Other(u8),
}

impl From<u8> for ActivityKind {
    fn from(value: u8) -> Self {
        match value {
            0 => ActivityKind::Playing,
            1 => ActivityKind::Streaming,
            2 => ActivityKind::Listening,
            3 => ActivityKind::Watching,
            4 => ActivityKind::Custom,
            5 => ActivityKind::Competing,
            other => ActivityKind::Other(other),
        }
    }
}

impl From<ActivityKind> for u8 {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Playing => 0,
            ActivityKind::Streaming => 1,
            ActivityKind::Listening => 2,
            ActivityKind::Watching => 3,
            ActivityKind::Custom => 4,
            ActivityKind::Competing => 5,
            ActivityKind::Other(other) => other,
        }
    }
}

/// Epoch-millisecond bounds. Either end may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub large_image: Option<String>,
    #[serde(default)]
    pub large_text: Option<String>,
    #[serde(default)]
    pub small_image: Option<String>,
    #[serde(default)]
    pub small_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub track_id: Option<String>,
    pub song: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_art_url: Option<String>,
    #[serde(default)]
    pub timestamps: Option<TimeRange>,
}
