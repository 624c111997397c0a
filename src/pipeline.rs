//! Chat pipeline: classify, assemble, generate, extract.
//!
//! One request flows through four stages: the intent classifier
//! short-circuits chit-chat, the context assembler selects what the model
//! sees, the gateway produces text, and the citation extractor validates
//! the timestamps it referenced. Everything except the gateway call is a
//! pure in-memory computation; the pipeline holds no per-request state and
//! can serve concurrent requests without coordination.

use crate::citation::{Citation, CitationExtractor};
use crate::config::{Prompts, Settings};
use crate::context::{BudgetProfile, ContextAssembler};
use crate::error::Result;
use crate::generation::{GenerationError, Generator};
use crate::intent::{IntentClassifier, IntentKind};
use crate::prompt::PromptBuilder;
use crate::video::{ConversationTurn, VideoContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Safe reply when the generation service filters the response.
const CONTENT_FILTERED_REPLY: &str =
    "I can't answer that one. Try asking about the video's content instead.";

/// One chat request, fully self-contained.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub video: VideoContext,
    #[serde(default)]
    pub current_time_seconds: u32,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub profile: BudgetProfile,
}

/// The pipeline's answer: response text plus validated citations.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub content: String,
    pub citations: Vec<Citation>,
}

/// The full classify -> assemble -> generate -> extract pipeline.
pub struct ChatPipeline {
    classifier: IntentClassifier,
    assembler: ContextAssembler,
    prompt_builder: PromptBuilder,
    extractor: CitationExtractor,
    generator: Arc<dyn Generator>,
}

impl ChatPipeline {
    /// Build a pipeline from settings and a generation backend.
    pub fn new(settings: &Settings, generator: Arc<dyn Generator>) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self {
            classifier: IntentClassifier::new(),
            assembler: ContextAssembler::new(
                settings.context.clone(),
                settings.vocabulary.clone(),
            ),
            prompt_builder: PromptBuilder::new(prompts, settings.context.history_turns),
            extractor: CitationExtractor::new(settings.citations.clone()),
            generator,
        })
    }

    /// Answer a chat request.
    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatReply> {
        let mut rng = StdRng::from_entropy();
        self.respond_with_rng(request, &mut rng).await
    }

    /// Answer a chat request with an injected randomness source, so canned
    /// reply selection can be pinned in tests.
    #[instrument(skip_all, fields(message = %request.message))]
    pub async fn respond_with_rng(
        &self,
        request: &ChatRequest,
        rng: &mut (impl Rng + Send),
    ) -> Result<ChatReply> {
        let intent = self.classifier.classify(&request.message, rng);
        if intent.kind != IntentKind::None {
            info!("Short-circuited as {:?}, no generation call", intent.kind);
            return Ok(ChatReply {
                content: intent.reply.unwrap_or_default(),
                citations: Vec::new(),
            });
        }

        let video = request.video.clone().normalized();
        let context =
            self.assembler
                .assemble(&video, request.current_time_seconds, request.profile);
        debug!(
            truncated = context.transcript_truncated,
            "Assembled context for {:?} profile", request.profile
        );

        let prompt = self.prompt_builder.build(
            &video,
            &context,
            &request.history,
            &request.message,
            request.current_time_seconds,
        );

        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(GenerationError::ContentFiltered) => {
                return Ok(ChatReply {
                    content: CONTENT_FILTERED_REPLY.to_string(),
                    citations: Vec::new(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let citations = self.extractor.extract(&text, video.duration_seconds);
        info!("Generated reply with {} citations", citations.len());

        Ok(ChatReply { content: text, citations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Test generator returning a fixed response and recording calls.
    struct StubGenerator {
        response: std::result::Result<String, GenerationError>,
        calls: Mutex<usize>,
    }

    impl StubGenerator {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: Mutex::new(0),
            }
        }

        fn failing(err: GenerationError) -> Self {
            Self {
                response: Err(err),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Generator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, GenerationError> {
            *self.calls.lock().unwrap() += 1;
            self.response.clone()
        }
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            video: VideoContext {
                title: "Concurrency Walkthrough".to_string(),
                description: "Threads and channels".to_string(),
                duration_seconds: 200,
                sections: vec![],
                transcript: "[0:10] intro\n[1:30] the main example".to_string(),
            },
            current_time_seconds: 0,
            history: vec![],
            profile: BudgetProfile::Conversational,
        }
    }

    fn pipeline(generator: Arc<StubGenerator>) -> ChatPipeline {
        ChatPipeline::new(&Settings::default(), generator).unwrap()
    }

    #[tokio::test]
    async fn test_chitchat_short_circuits_generation() {
        let generator = Arc::new(StubGenerator::ok("unused"));
        let p = pipeline(generator.clone());

        let reply = p.respond(&request("thanks!")).await.unwrap();

        assert!(!reply.content.is_empty());
        assert!(reply.citations.is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_pipeline_extracts_citations() {
        let generator = Arc::new(StubGenerator::ok(
            "Check 1:30 and also 1:30 again, then 2:05.",
        ));
        let p = pipeline(generator.clone());

        let reply = p.respond(&request("where is the main example?")).await.unwrap();

        assert_eq!(generator.call_count(), 1);
        assert_eq!(reply.citations.len(), 2);
        assert_eq!(reply.citations[0].start_time, 90);
        assert_eq!(reply.citations[1].start_time, 125);
    }

    #[tokio::test]
    async fn test_citations_clamped_to_video() {
        // The model hallucinates a timestamp past the 200s video.
        let generator = Arc::new(StubGenerator::ok("It happens at 99:59."));
        let p = pipeline(generator);

        let reply = p.respond(&request("when does it happen?")).await.unwrap();
        assert!(reply.citations.is_empty());
    }

    #[tokio::test]
    async fn test_content_filter_maps_to_safe_reply() {
        let generator = Arc::new(StubGenerator::failing(GenerationError::ContentFiltered));
        let p = pipeline(generator);

        let reply = p.respond(&request("tell me something")).await.unwrap();
        assert_eq!(reply.content, CONTENT_FILTERED_REPLY);
        assert!(reply.citations.is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let generator = Arc::new(StubGenerator::failing(GenerationError::RateLimited));
        let p = pipeline(generator);

        let result = p.respond(&request("tell me something")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_seeded_reply_is_deterministic() {
        let p = pipeline(Arc::new(StubGenerator::ok("unused")));

        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let first = p.respond_with_rng(&request("hello"), &mut a).await.unwrap();
        let second = p.respond_with_rng(&request("hello"), &mut b).await.unwrap();
        assert_eq!(first.content, second.content);
    }
}
