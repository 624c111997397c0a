//! Generation gateway boundary.
//!
//! The external text-generation service is an opaque collaborator: prompt
//! in, text out, or a classified failure. The pipeline never retries here;
//! a failed call degrades to a safe message at the caller.

mod openai;

pub use openai::OpenAIGenerator;

use async_trait::async_trait;
use thiserror::Error;

/// Classified failures from the generation service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid API credentials")]
    InvalidCredentials,

    #[error("rate limited by the generation service")]
    RateLimited,

    #[error("response blocked by content filter")]
    ContentFiltered,

    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}

/// Trait for text generation backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a response for the given instruction prompt.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError>;
}
