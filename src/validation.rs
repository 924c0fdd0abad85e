//! Shape check for video links.
//!
//! This is an approximate filter in front of the download service, not a
//! guarantee that the link resolves: anything after the first identifier
//! character is accepted as is.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

const VIDEO_URL_PATTERN: &str =
    r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/|v/)|youtu\.be/)[\w-]+";

fn video_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VIDEO_URL_PATTERN).expect("video URL pattern is valid"))
}

pub fn is_valid_video_url(url: &str) -> bool {
    video_url_regex().is_match(url)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !is_valid_video_url(url) {
        return Err(ValidationError::Malformed);
    }
    Ok(())
}
