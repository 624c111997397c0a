//! Video source abstraction: ID parsing, metadata, transcripts, sections.
//!
//! Both providers are traits so the processing pipeline can run against
//! stubs in tests and degrade gracefully in production: metadata falls back
//! to documented defaults, transcripts to an explicit placeholder.

mod metadata;
mod sections;
mod transcript;

pub use metadata::{FallbackMetadataProvider, YouTubeMetadataProvider};
pub use sections::generate_sections;
pub use transcript::TranscriptServiceClient;

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use url::Url;

/// Metadata for one video, as fetched from the provider.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
}

/// Trait for video metadata providers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for a video ID.
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata>;
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the transcript text for a video ID.
    async fn fetch_transcript(&self, video_id: &str) -> Result<String>;
}

/// Extract a video ID from a YouTube URL or bare 11-character ID.
///
/// Handles `watch?v=`, `youtu.be/`, `embed/` and `/v/` URL forms.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    let id_regex = video_id_regex();

    // Bare ID first: an 11-char token with no URL structure.
    if id_regex.is_match(input) && !input.contains('/') && !input.contains('.') {
        return Some(input.to_string());
    }

    // Tolerate scheme-less URLs like "youtube.com/watch?v=...".
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };
    let url = Url::parse(&candidate).ok()?;
    let host = url.host_str()?;

    if host.ends_with("youtu.be") {
        let id = url.path_segments()?.next()?.to_string();
        return id_regex.is_match(&id).then_some(id);
    }

    if host.ends_with("youtube.com") {
        if url.path() == "/watch" {
            let id = url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.to_string())?;
            return id_regex.is_match(&id).then_some(id);
        }
        let mut segments = url.path_segments()?;
        if let Some("embed" | "v") = segments.next() {
            let id = segments.next()?.to_string();
            return id_regex.is_match(&id).then_some(id);
        }
    }

    None
}

fn video_id_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid video ID regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_from_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_bare_id() {
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_schemeless_url() {
        assert_eq!(
            extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ&t=30s"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert_eq!(extract_video_id("not a video"), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
