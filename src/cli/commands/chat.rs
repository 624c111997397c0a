//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::context::BudgetProfile;
use crate::error::SpoleError;
use crate::generation::OpenAIGenerator;
use crate::pipeline::{ChatPipeline, ChatRequest};
use crate::processor::VideoProcessor;
use crate::video::ConversationTurn;
use crate::video_source::extract_video_id;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Run the interactive chat command.
pub async fn run_chat(video: &str, settings: Settings) -> anyhow::Result<()> {
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
    let context = stored.to_context();

    let mut history: Vec<ConversationTurn> = Vec::new();

    println!("\n{}", style(format!("Chatting about: {}", stored.title)).bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            history.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        let request = ChatRequest {
            message: input.to_string(),
            video: context.clone(),
            current_time_seconds: 0,
            history: history.clone(),
            profile: BudgetProfile::Conversational,
        };

        match pipeline.respond(&request).await {
            Ok(reply) => {
                println!("\n{} {}\n", style("Spole:").cyan().bold(), reply.content);

                if !reply.citations.is_empty() {
                    for citation in &reply.citations {
                        Output::citation(citation);
                    }
                    println!();
                }

                history.push(ConversationTurn::user(input));
                history.push(ConversationTurn::assistant(reply.content));
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
