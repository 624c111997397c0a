//! CLI output formatting utilities.

use crate::citation::Citation;
use crate::timecode::format_timestamp;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a processed-video list entry.
    pub fn video_info(title: &str, id: &str, sections: usize, duration_seconds: u32) {
        println!(
            "  {} {} ({}, {} sections, {})",
            style("*").cyan(),
            style(title).bold(),
            style(id).dim(),
            sections,
            format_timestamp(duration_seconds as i64),
        );
    }

    /// Print one citation with its time range.
    pub fn citation(citation: &Citation) {
        let range = format!(
            "{} - {}",
            format_timestamp(citation.start_time as i64),
            format_timestamp(citation.end_time as i64)
        );
        match &citation.context_snippet {
            Some(snippet) => println!(
                "  {} {}  {}",
                style("@").green(),
                style(&range).cyan(),
                style(snippet_preview(snippet, 100)).dim()
            ),
            None => println!("  {} {}", style("@").green(), style(&range).cyan()),
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Flatten and truncate snippet text for single-line display.
fn snippet_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let prefix: String = content.chars().take(max_chars).collect();
        format!("{}...", prefix)
    }
}
