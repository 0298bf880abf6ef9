/// Video page detection and video id extraction
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Accepted shapes:
/// - youtube.com/watch?v=<id> (v may follow other query params)
/// - youtube.com/embed/<id>
/// - youtube.com/v/<id>
/// - youtu.be/<id>
///
/// The id is exactly 11 token characters; a longer run is rejected.
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|v/)|youtu\.be/)([a-zA-Z0-9_-]{11})(?:[^a-zA-Z0-9_-]|$)",
    )
    .expect("video id pattern is valid")
});

/// 11-character token identifying a hosted video
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts a bare token, e.g. from a `?v=` query parameter
    pub fn parse(token: &str) -> Option<VideoId> {
        let token = token.trim();
        let well_formed = token.len() == 11
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        well_formed.then(|| VideoId(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether a URL points at a recognized video-hosting domain
pub fn is_video_page(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }

    match extract_hostname(url) {
        Some(host) => {
            host == "youtube.com"
                || host.ends_with(".youtube.com")
                || host == "youtu.be"
                || host == "www.youtu.be"
        }
        None => false,
    }
}

/// Extract the video id from one of the accepted URL shapes
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

/// Lowercased hostname; tolerates a missing scheme
fn extract_hostname(url: &str) -> Option<String> {
    let trimmed = url.trim();

    if let Ok(parsed) = Url::parse(trimmed) {
        return parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .map(|host| host.to_lowercase());
    }

    // No scheme: take everything before the first '/', then drop any port
    let host = trimmed.split('/').next()?.split(':').next()?.to_lowercase();

    if host.is_empty() { None } else { Some(host) }
}
