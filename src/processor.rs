//! Video processing coordinator.
//!
//! Takes a URL or video ID through the full ingest path: resolve the ID,
//! fetch metadata and transcript, derive a section breakdown, and persist
//! the result so chat requests can reference it.

use crate::config::Settings;
use crate::error::{Result, SpoleError};
use crate::store::{SqliteVideoStore, StoredVideo, VideoStore};
use crate::video_source::{
    extract_video_id, generate_sections, FallbackMetadataProvider, MetadataProvider,
    TranscriptProvider, TranscriptServiceClient, YouTubeMetadataProvider,
};
use crate::video::DEFAULT_TRANSCRIPT;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of processing one video.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub video_id: String,
    pub title: String,
    pub section_count: usize,
    pub transcript_available: bool,
    /// True when the video was already processed and left untouched.
    pub skipped: bool,
}

/// Coordinates providers and the store for video ingest.
pub struct VideoProcessor {
    metadata: Arc<dyn MetadataProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
    store: Arc<dyn VideoStore>,
}

impl VideoProcessor {
    /// Create a processor with providers resolved from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let metadata: Arc<dyn MetadataProvider> = match &settings.youtube.api_key {
            Some(key) if !key.is_empty() => Arc::new(YouTubeMetadataProvider::new(key.clone())),
            _ => match std::env::var("YOUTUBE_API_KEY") {
                Ok(key) if !key.is_empty() => Arc::new(YouTubeMetadataProvider::new(key)),
                _ => Arc::new(FallbackMetadataProvider),
            },
        };

        let transcripts = Arc::new(TranscriptServiceClient::new(
            settings.youtube.transcript_service_url.clone(),
        ));

        let store = Arc::new(SqliteVideoStore::new(&settings.sqlite_path())?);

        Ok(Self {
            metadata,
            transcripts,
            store,
        })
    }

    /// Create a processor with custom components.
    pub fn with_components(
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        store: Arc<dyn VideoStore>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            store,
        }
    }

    /// Get a reference to the video store.
    pub fn store(&self) -> Arc<dyn VideoStore> {
        self.store.clone()
    }

    /// Process a video from a URL or bare ID.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn process(&self, input: &str, force: bool) -> Result<ProcessResult> {
        let video_id = extract_video_id(input).ok_or_else(|| {
            SpoleError::InvalidInput(format!("Could not parse a video ID from: {}", input))
        })?;

        if !force {
            if let Some(existing) = self.store.get(&video_id).await? {
                info!("Video {} already processed, skipping", video_id);
                return Ok(ProcessResult {
                    video_id,
                    title: existing.title,
                    section_count: existing.sections.len(),
                    transcript_available: existing.transcript != DEFAULT_TRANSCRIPT,
                    skipped: true,
                });
            }
        }

        info!("Processing video {}", video_id);

        // Metadata and transcript come from independent services.
        let (metadata, transcript) = futures::join!(
            self.metadata.fetch_metadata(&video_id),
            self.transcripts.fetch_transcript(&video_id),
        );

        let metadata = metadata?;

        // A missing transcript degrades to the placeholder; the chat
        // pipeline still works from metadata and sections.
        let (transcript, transcript_available) = match transcript {
            Ok(text) => (text, true),
            Err(e) => {
                warn!("No transcript for {}: {}", video_id, e);
                (DEFAULT_TRANSCRIPT.to_string(), false)
            }
        };

        let sections = generate_sections(
            &metadata.title,
            &metadata.description,
            metadata.duration_seconds,
        );

        let stored = StoredVideo {
            video_id: video_id.clone(),
            title: metadata.title,
            description: metadata.description,
            duration_seconds: metadata.duration_seconds,
            sections,
            transcript,
            processed_at: Utc::now(),
        };

        self.store.upsert(&stored).await?;

        info!(
            "Processed {} ({} sections, transcript: {})",
            video_id,
            stored.sections.len(),
            transcript_available
        );

        Ok(ProcessResult {
            video_id,
            title: stored.title,
            section_count: stored.sections.len(),
            transcript_available,
            skipped: false,
        })
    }
}
