//! SQLite-based video store implementation.
//!
//! Sections are stored as a JSON column; at this scale (one row per
//! processed video) there is nothing to gain from normalizing them out.

use super::{StoredVideo, StoredVideoSummary, VideoStore};
use crate::error::{Result, SpoleError};
use crate::video::Section;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// SQLite-based video store.
pub struct SqliteVideoStore {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    video_id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    duration_seconds INTEGER NOT NULL,
    sections_json TEXT NOT NULL,
    transcript TEXT NOT NULL,
    processed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_videos_processed_at ON videos(processed_at);
"#;

impl SqliteVideoStore {
    /// Create a new SQLite video store.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better concurrent read behavior
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite video store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite video store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| SpoleError::Config(format!("Invalid timestamp in store: {}", e)))
    }
}

#[async_trait]
impl VideoStore for SqliteVideoStore {
    async fn upsert(&self, video: &StoredVideo) -> Result<()> {
        let sections_json = serde_json::to_string(&video.sections)?;
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            INSERT OR REPLACE INTO videos
                (video_id, title, description, duration_seconds, sections_json, transcript, processed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                video.video_id,
                video.title,
                video.description,
                video.duration_seconds,
                sections_json,
                video.transcript,
                video.processed_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn get(&self, video_id: &str) -> Result<Option<StoredVideo>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT video_id, title, description, duration_seconds, sections_json, transcript, processed_at
            FROM videos WHERE video_id = ?1
            "#,
        )?;

        let mut rows = stmt.query(params![video_id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let sections_json: String = row.get(4)?;
        let sections: Vec<Section> = serde_json::from_str(&sections_json)?;
        let processed_at_raw: String = row.get(6)?;

        Ok(Some(StoredVideo {
            video_id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            duration_seconds: row.get(3)?,
            sections,
            transcript: row.get(5)?,
            processed_at: Self::parse_timestamp(&processed_at_raw)?,
        }))
    }

    async fn list(&self) -> Result<Vec<StoredVideoSummary>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT video_id, title, duration_seconds, sections_json, processed_at
            FROM videos ORDER BY processed_at DESC
            "#,
        )?;

        let mut summaries = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let sections_json: String = row.get(3)?;
            let sections: Vec<Section> = serde_json::from_str(&sections_json)?;
            let processed_at_raw: String = row.get(4)?;

            summaries.push(StoredVideoSummary {
                video_id: row.get(0)?,
                title: row.get(1)?,
                duration_seconds: row.get(2)?,
                section_count: sections.len(),
                processed_at: Self::parse_timestamp(&processed_at_raw)?,
            });
        }

        Ok(summaries)
    }

    async fn delete(&self, video_id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM videos WHERE video_id = ?1", params![video_id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> StoredVideo {
        StoredVideo {
            video_id: id.to_string(),
            title: "Test Video".to_string(),
            description: "desc".to_string(),
            duration_seconds: 450,
            sections: vec![Section {
                index: 1,
                title: "Intro".to_string(),
                start_time: 0,
                end_time: 120,
                description: "Opening".to_string(),
                excerpt: Some("excerpt text".to_string()),
            }],
            transcript: "[0:10] hello".to_string(),
            processed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = SqliteVideoStore::in_memory().unwrap();
        store.upsert(&sample("abc12345678")).await.unwrap();

        let found = store.get("abc12345678").await.unwrap().unwrap();
        assert_eq!(found.title, "Test Video");
        assert_eq!(found.sections.len(), 1);
        assert_eq!(found.sections[0].excerpt.as_deref(), Some("excerpt text"));
    }

    #[tokio::test]
    async fn test_missing_video_is_none() {
        let store = SqliteVideoStore::in_memory().unwrap();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let store = SqliteVideoStore::in_memory().unwrap();
        store.upsert(&sample("video0000001")).await.unwrap();
        store.upsert(&sample("video0000002")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].section_count, 1);

        assert!(store.delete("video0000001").await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
