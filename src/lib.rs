//! Spole - Chat with YouTube videos
//!
//! A backend and CLI for asking questions about a YouTube video's content
//! and getting answers that cite timestamps into its timeline.
//!
//! The name "Spole" comes from the Norwegian word for "rewind."
//!
//! # Overview
//!
//! Spole lets you:
//! - Process a video: fetch metadata and transcript, build a section breakdown
//! - Chat about the video with timestamp-cited answers
//! - Serve an HTTP API for a web front-end
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `timecode` - Timestamp display and parsing
//! - `video` - Video-side data model
//! - `intent` - Conversational intent short-circuiting
//! - `context` - Context assembly under size budgets
//! - `prompt` - Prompt construction
//! - `citation` - Citation extraction from generated text
//! - `generation` - Generation gateway boundary
//! - `pipeline` - The chat pipeline
//! - `video_source` - Metadata/transcript providers and section heuristics
//! - `store` - Processed-video persistence
//! - `processor` - Video ingest coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use spole::config::Settings;
//! use spole::generation::OpenAIGenerator;
//! use spole::pipeline::{ChatPipeline, ChatRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let generator = Arc::new(OpenAIGenerator::new(&settings.generation));
//!     let pipeline = ChatPipeline::new(&settings, generator)?;
//!
//!     let request = ChatRequest {
//!         message: "What happens at the start?".to_string(),
//!         video: Default::default(),
//!         current_time_seconds: 0,
//!         history: Vec::new(),
//!         profile: Default::default(),
//!     };
//!     let reply = pipeline.respond(&request).await?;
//!     println!("{} ({} citations)", reply.content, reply.citations.len());
//!
//!     Ok(())
//! }
//! ```

pub mod citation;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod intent;
pub mod pipeline;
pub mod processor;
pub mod prompt;
pub mod store;
pub mod timecode;
pub mod video;
pub mod video_source;

pub use error::{Result, SpoleError};
