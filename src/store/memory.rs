//! In-memory video store implementation.
//!
//! Useful for testing and ephemeral sessions.

use super::{StoredVideo, StoredVideoSummary, VideoStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory video store.
pub struct MemoryVideoStore {
    videos: RwLock<HashMap<String, StoredVideo>>,
}

impl MemoryVideoStore {
    /// Create a new in-memory video store.
    pub fn new() -> Self {
        Self {
            videos: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn upsert(&self, video: &StoredVideo) -> Result<()> {
        let mut videos = self.videos.write().unwrap();
        videos.insert(video.video_id.clone(), video.clone());
        Ok(())
    }

    async fn get(&self, video_id: &str) -> Result<Option<StoredVideo>> {
        let videos = self.videos.read().unwrap();
        Ok(videos.get(video_id).cloned())
    }

    async fn list(&self) -> Result<Vec<StoredVideoSummary>> {
        let videos = self.videos.read().unwrap();
        let mut summaries: Vec<StoredVideoSummary> = videos
            .values()
            .map(|v| StoredVideoSummary {
                video_id: v.video_id.clone(),
                title: v.title.clone(),
                duration_seconds: v.duration_seconds,
                section_count: v.sections.len(),
                processed_at: v.processed_at,
            })
            .collect();

        summaries.sort_by(|a, b| b.processed_at.cmp(&a.processed_at));
        Ok(summaries)
    }

    async fn delete(&self, video_id: &str) -> Result<bool> {
        let mut videos = self.videos.write().unwrap();
        Ok(videos.remove(video_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(id: &str) -> StoredVideo {
        StoredVideo {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            duration_seconds: 600,
            sections: vec![],
            transcript: "hello".to_string(),
            processed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let store = MemoryVideoStore::new();
        store.upsert(&sample("abc12345678")).await.unwrap();

        let found = store.get("abc12345678").await.unwrap().unwrap();
        assert_eq!(found.title, "Video abc12345678");
        assert!(store.get("missing-id-0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = MemoryVideoStore::new();
        store.upsert(&sample("abc12345678")).await.unwrap();

        let mut updated = sample("abc12345678");
        updated.title = "Updated".to_string();
        store.upsert(&updated).await.unwrap();

        let found = store.get("abc12345678").await.unwrap().unwrap();
        assert_eq!(found.title, "Updated");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryVideoStore::new();
        store.upsert(&sample("abc12345678")).await.unwrap();

        assert!(store.delete("abc12345678").await.unwrap());
        assert!(!store.delete("abc12345678").await.unwrap());
    }
}
