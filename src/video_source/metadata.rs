//! Video metadata via the YouTube Data API.

use super::{MetadataProvider, VideoMetadata};
use crate::error::{Result, SpoleError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

/// Duration assumed when no metadata is available.
const FALLBACK_DURATION_SECONDS: u32 = 600;

/// Metadata provider backed by the YouTube Data API v3.
pub struct YouTubeMetadataProvider {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Snippet,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

impl YouTubeMetadataProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MetadataProvider for YouTubeMetadataProvider {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = format!(
            "https://www.googleapis.com/youtube/v3/videos?id={}&key={}&part=snippet,contentDetails",
            video_id, self.api_key
        );

        debug!("Fetching metadata for {}", video_id);

        let response: VideosResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SpoleError::Metadata(e.to_string()))?
            .json()
            .await?;

        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| SpoleError::VideoNotFound(video_id.to_string()))?;

        Ok(VideoMetadata {
            id: video_id.to_string(),
            title: item.snippet.title,
            description: item.snippet.description,
            duration_seconds: parse_iso8601_duration(&item.content_details.duration),
        })
    }
}

/// Metadata provider used when no API key is configured.
///
/// Returns documented defaults instead of failing, so a video can still be
/// processed and chatted about in a limited mode.
pub struct FallbackMetadataProvider;

#[async_trait]
impl MetadataProvider for FallbackMetadataProvider {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        warn!("No YouTube API key configured, using fallback metadata for {}", video_id);
        Ok(VideoMetadata {
            id: video_id.to_string(),
            title: "Video Analysis".to_string(),
            description: "Video analysis and chat interface for YouTube content".to_string(),
            duration_seconds: FALLBACK_DURATION_SECONDS,
        })
    }
}

/// Parse an ISO-8601 duration like `PT1H2M3S` into seconds.
///
/// Missing groups default to zero; malformed input parses to zero rather
/// than erroring, matching how the rest of the pipeline treats bad
/// upstream data.
pub fn parse_iso8601_duration(duration: &str) -> u32 {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("Invalid duration regex")
    });

    let Some(caps) = re.captures(duration.trim()) else {
        return 0;
    };

    let group = |i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    group(1) * 3600 + group(2) * 60 + group(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_duration() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), 3723);
    }

    #[test]
    fn test_parse_partial_groups() {
        assert_eq!(parse_iso8601_duration("PT15M"), 900);
        assert_eq!(parse_iso8601_duration("PT45S"), 45);
        assert_eq!(parse_iso8601_duration("PT2H"), 7200);
        assert_eq!(parse_iso8601_duration("PT10M30S"), 630);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse_iso8601_duration(""), 0);
        assert_eq!(parse_iso8601_duration("garbage"), 0);
        assert_eq!(parse_iso8601_duration("P1D"), 0);
    }

    #[tokio::test]
    async fn test_fallback_provider_defaults() {
        let meta = FallbackMetadataProvider
            .fetch_metadata("dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(meta.title, "Video Analysis");
        assert_eq!(meta.duration_seconds, FALLBACK_DURATION_SECONDS);
    }
}
