use crate::snapshot::{Activity, User};

const CDN: &str = "https://cdn.discordapp.com";
const SPOTIFY_IMAGES: &str = "https://i.scdn.co/image";
const MEDIA_PROXY: &str = "https://media.discordapp.net";

/// `global_name` when set, otherwise `username`.
pub fn display_name(user: &User) -> &str {
    user.global_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(&user.username)
}

/// Avatar image URL, or `None` when the user has the default avatar.
pub fn avatar_url(user: &User) -> Option<String> {
    let avatar = user.avatar.as_deref()?;
    Some(format!("{CDN}/avatars/{}/{avatar}.png", user.id))
}

/// Resolve an activity's large image to a fetchable URL.
///
/// Handles `spotify:<hash>` album art, `mp:<path>` external assets, and
/// application assets keyed by the activity's application id.
pub fn activity_art_url(activity: &Activity) -> Option<String> {
    let image = activity.assets.as_ref()?.large_image.as_deref()?;

    if let Some(hash) = image.strip_prefix("spotify:") {
        return Some(format!("{SPOTIFY_IMAGES}/{hash}"));
    }
    if let Some(path) = image.strip_prefix("mp:") {
        return Some(format!("{MEDIA_PROXY}/{path}"));
    }

    let app_id = activity
        .application_id
        .as_deref()
        .or(activity.id.as_deref())?;
    Some(format!("{CDN}/app-assets/{app_id}/{image}.png"))
}
