//! OpenAI-compatible generation backend.
//!
//! Targets any chat-completions endpoint speaking the OpenAI wire format;
//! the default configuration points at Groq.

use super::{GenerationError, Generator};
use crate::config::GenerationSettings;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, FinishReason,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the API key when not set in config.
const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Timeout for generation requests.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Generation gateway backed by an OpenAI-compatible chat completions API.
pub struct OpenAIGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIGenerator {
    pub fn new(settings: &GenerationSettings) -> Self {
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();

        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(api_key);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client: Client::with_config(config).with_http_client(http_client),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        debug!("Calling generation API, model {}", self.model);

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_error)?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| GenerationError::Unavailable("empty response".to_string()))?;

        if choice.finish_reason == Some(FinishReason::ContentFilter) {
            warn!("Generation response blocked by content filter");
            return Err(GenerationError::ContentFiltered);
        }

        choice
            .message
            .content
            .clone()
            .ok_or_else(|| GenerationError::Unavailable("response had no content".to_string()))
    }
}

/// Map transport/API errors onto the classified failure taxonomy.
fn classify_error(err: OpenAIError) -> GenerationError {
    match err {
        OpenAIError::ApiError(api) => {
            let message = api.message.to_lowercase();
            if message.contains("api key") || message.contains("unauthorized") {
                GenerationError::InvalidCredentials
            } else if message.contains("rate limit") || message.contains("quota") {
                GenerationError::RateLimited
            } else if message.contains("content") && message.contains("filter") {
                GenerationError::ContentFiltered
            } else {
                GenerationError::Unavailable(api.message)
            }
        }
        other => GenerationError::Unavailable(other.to_string()),
    }
}
