use serde::Serialize;

use crate::snapshot::{Activity, ActivityKind, PresenceSnapshot, TimeRange};

use super::urls::activity_art_url;

/// What the subject is listening to, whatever the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSession {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub art_url: Option<String>,
    pub timestamps: Option<TimeRange>,
    pub track_id: Option<String>,
}

/// The current media session: the dedicated listening record if the server
/// sent one, otherwise the first named `Listening` activity.
pub fn media_session(snapshot: &PresenceSnapshot) -> Option<MediaSession> {
    if let Some(track) = &snapshot.spotify {
        return Some(MediaSession {
            title: track.song.clone(),
            artist: Some(track.artist.clone()),
            album: track.album.clone(),
            art_url: track.album_art_url.clone(),
            timestamps: track.timestamps,
            track_id: track.track_id.clone(),
        });
    }

    snapshot
        .activities
        .iter()
        .filter(|activity| activity.kind == ActivityKind::Listening)
        .find_map(|activity| {
            Some(MediaSession {
                title: activity.name.clone()?,
                artist: activity.details.clone(),
                album: activity.state.clone(),
                art_url: activity_art_url(activity),
                timestamps: activity.timestamps,
                track_id: None,
            })
        })
}

/// Activities to list alongside the media card, in server order.
/// `Listening` entries are left out since the media session covers them.
pub fn visible_activities(snapshot: &PresenceSnapshot) -> impl Iterator<Item = &Activity> {
    snapshot
        .activities
        .iter()
        .filter(|activity| activity.kind != ActivityKind::Listening)
}
