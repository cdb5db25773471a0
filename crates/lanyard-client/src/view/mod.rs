//! Display projections over a [`PresenceSnapshot`](crate::PresenceSnapshot).
//!
//! Pure functions for consumers that render presence. Nothing here touches
//! the connection; every input may be partially missing and every output
//! degrades to `None` or an empty list rather than failing.

mod media;
mod status;
mod time;
mod urls;

pub use media::{media_session, visible_activities, MediaSession};
pub use time::{format_elapsed, now_millis, playback_progress};
pub use urls::{activity_art_url, avatar_url, display_name};
