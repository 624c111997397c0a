//! Process command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::processor::VideoProcessor;
use anyhow::Result;

/// Run the process command.
pub async fn run_process(input: &str, force: bool, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Process, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let processor = VideoProcessor::new(&settings)?;

    let spinner = Output::spinner("Processing video...");
    let result = processor.process(input, force).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) if result.skipped => {
            Output::info(&format!(
                "{} is already processed. Use --force to re-process.",
                result.video_id
            ));
        }
        Ok(result) => {
            Output::success(&format!("Processed \"{}\"", result.title));
            Output::kv("Video ID", &result.video_id);
            Output::kv("Sections", &result.section_count.to_string());
            Output::kv(
                "Transcript",
                if result.transcript_available {
                    "available"
                } else {
                    "not available"
                },
            );
        }
        Err(e) => {
            Output::error(&format!("Failed to process video: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
