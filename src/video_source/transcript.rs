//! Transcript fetching via the transcript sidecar service.

use super::TranscriptProvider;
use crate::error::{Result, SpoleError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Client for the transcript service (`POST /transcript`).
pub struct TranscriptServiceClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<TranscriptData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptData {
    #[serde(default)]
    transcript: String,
}

impl TranscriptServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranscriptProvider for TranscriptServiceClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let url = format!("{}/transcript", self.base_url.trim_end_matches('/'));
        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);

        debug!("Fetching transcript for {}", video_id);

        let response: TranscriptResponse = self
            .client
            .post(&url)
            .json(&json!({ "url": watch_url }))
            .send()
            .await?
            .json()
            .await?;

        if !response.success {
            return Err(SpoleError::Transcript(
                response
                    .error
                    .unwrap_or_else(|| "transcript service reported failure".to_string()),
            ));
        }

        let transcript = response
            .data
            .map(|d| d.transcript)
            .unwrap_or_default();

        if transcript.trim().is_empty() {
            return Err(SpoleError::Transcript(format!(
                "empty transcript for {}",
                video_id
            )));
        }

        Ok(transcript)
    }
}
