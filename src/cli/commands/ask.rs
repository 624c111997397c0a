//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::context::BudgetProfile;
use crate::error::SpoleError;
use crate::generation::OpenAIGenerator;
use crate::pipeline::{ChatPipeline, ChatRequest};
use crate::processor::VideoProcessor;
use crate::video_source::extract_video_id;
use anyhow::Result;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(
    video: &str,
    question: &str,
    at_seconds: u32,
    deep: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let video_id = extract_video_id(video).ok_or_else(|| {
        SpoleError::InvalidInput(format!("Could not parse a video ID from: {}", video))
    })?;

    let processor = VideoProcessor::new(&settings)?;
    let stored = processor
        .store()
        .get(&video_id)
        .await?
        .ok_or_else(|| SpoleError::VideoNotFound(format!("{} (run 'spole process' first)", video_id)))?;

    let generator = Arc::new(OpenAIGenerator::new(&settings.generation));
    let pipeline = ChatPipeline::new(&settings, generator)?;

    let request = ChatRequest {
        message: question.to_string(),
        video: stored.to_context(),
        current_time_seconds: at_seconds,
        history: Vec::new(),
        profile: if deep {
            BudgetProfile::DeepAnalysis
        } else {
            BudgetProfile::Conversational
        },
    };

    let spinner = Output::spinner("Thinking...");
    let result = pipeline.respond(&request).await;
    spinner.finish_and_clear();

    match result {
        Ok(reply) => {
            println!("\n{}\n", reply.content);

            if !reply.citations.is_empty() {
                Output::header("Citations");
                for citation in &reply.citations {
                    Output::citation(citation);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
