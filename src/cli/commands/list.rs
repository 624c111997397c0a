//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::processor::VideoProcessor;
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let processor = VideoProcessor::new(&settings)?;
    let videos = processor.store().list().await?;

    if videos.is_empty() {
        Output::info("No processed videos yet. Run 'spole process <url>' to add one.");
        return Ok(());
    }

    Output::header(&format!("Processed Videos ({})", videos.len()));
    for video in &videos {
        Output::video_info(
            &video.title,
            &video.video_id,
            video.section_count,
            video.duration_seconds,
        );
    }

    Ok(())
}
