//! Plain-text rendering of a snapshot for the terminal.

use lanyard_client::view::{
    display_name, format_elapsed, media_session, playback_progress, visible_activities,
};
use lanyard_client::{Activity, ActivityKind, PresenceFlags, PresenceSnapshot};

pub const PLACEHOLDER: &str = "connecting…";

/// Render one snapshot as a block of lines: a header, the media session if
/// any, then one line per remaining activity.
pub fn render(snapshot: &PresenceSnapshot, now_ms: i64) -> String {
    let mut lines = vec![header(snapshot)];

    if let Some(media) = media_session(snapshot) {
        let mut line = format!("  ♪ {}", media.title);
        if let Some(artist) = &media.artist {
            line.push_str(&format!(" by {artist}"));
        }
        if let Some(progress) = media
            .timestamps
            .and_then(|range| playback_progress(&range, now_ms))
        {
            line.push_str(&format!(" ({:.0}%)", progress * 100.0));
        }
        lines.push(line);
    }

    lines.extend(
        visible_activities(snapshot).map(|activity| format!("  {}", activity_line(activity, now_ms))),
    );
    lines.join("\n")
}

fn header(snapshot: &PresenceSnapshot) -> String {
    let name = match &snapshot.user {
        Some(user) => format!("{} (@{})", display_name(user), user.username),
        None => snapshot.subject_id.clone(),
    };
    let mut line = format!(
        "{name}: {} [{}]",
        snapshot.status.label(),
        snapshot.status.indicator()
    );
    let devices = devices(&snapshot.presence_flags);
    if !devices.is_empty() {
        line.push_str(&format!(" on {}", devices.join(", ")));
    }
    line
}

fn devices(flags: &PresenceFlags) -> Vec<&'static str> {
    [
        (flags.desktop, "desktop"),
        (flags.mobile, "mobile"),
        (flags.web, "web"),
    ]
    .into_iter()
    .filter_map(|(active, name)| active.then_some(name))
    .collect()
}

fn activity_line(activity: &Activity, now_ms: i64) -> String {
    let mut line = match activity.kind {
        ActivityKind::Custom => {
            let emoji = activity.emoji.as_ref().map(|e| e.name.as_str());
            [emoji, activity.state.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ")
        }
        kind => {
            let verb = match kind {
                ActivityKind::Streaming => "Streaming",
                ActivityKind::Watching => "Watching",
                ActivityKind::Competing => "Competing in",
                _ => "Playing",
            };
            let mut line = format!("{verb} {}", activity.name.as_deref().unwrap_or("something"));
            let detail: Vec<&str> = [activity.details.as_deref(), activity.state.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !detail.is_empty() {
                line.push_str(&format!(": {}", detail.join(" · ")));
            }
            line
        }
    };

    if let Some(start) = activity.timestamps.and_then(|range| range.start) {
        line.push_str(&format!(" ({})", format_elapsed(start, now_ms)));
    }
    line
}
