//! Processed-video store abstraction.
//!
//! Once a video is processed (metadata, transcript, sections), the result
//! is persisted so chat requests can reference it by ID. The chat pipeline
//! itself never touches the store; it is fed a request-scoped
//! [`VideoContext`] snapshot.

mod memory;
mod sqlite;

pub use memory::MemoryVideoStore;
pub use sqlite::SqliteVideoStore;

use crate::error::Result;
use crate::video::{Section, VideoContext};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A processed video as persisted in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVideo {
    /// YouTube video ID.
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub duration_seconds: u32,
    pub sections: Vec<Section>,
    pub transcript: String,
    /// When this video was processed.
    pub processed_at: DateTime<Utc>,
}

impl StoredVideo {
    /// Snapshot the stored record into a request-scoped pipeline context.
    pub fn to_context(&self) -> VideoContext {
        VideoContext {
            title: self.title.clone(),
            description: self.description.clone(),
            duration_seconds: self.duration_seconds,
            sections: self.sections.clone(),
            transcript: self.transcript.clone(),
        }
    }
}

/// Summary row for listing processed videos.
#[derive(Debug, Clone, Serialize)]
pub struct StoredVideoSummary {
    pub video_id: String,
    pub title: String,
    pub duration_seconds: u32,
    pub section_count: usize,
    pub processed_at: DateTime<Utc>,
}

/// Trait for processed-video store implementations.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert or replace a processed video.
    async fn upsert(&self, video: &StoredVideo) -> Result<()>;

    /// Fetch a processed video by ID.
    async fn get(&self, video_id: &str) -> Result<Option<StoredVideo>>;

    /// List all processed videos, most recent first.
    async fn list(&self) -> Result<Vec<StoredVideoSummary>>;

    /// Delete a processed video. Returns whether it existed.
    async fn delete(&self, video_id: &str) -> Result<bool>;
}
