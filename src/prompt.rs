//! Prompt construction for the generation gateway.
//!
//! Purely mechanical string assembly: video metadata, assembled context
//! blocks, a bounded tail of conversation history, and the user's question
//! are rendered into one instruction string through the `{{var}}` template
//! machinery. No branching on meaning, no I/O, no failure modes: missing
//! fields substitute documented defaults.

use crate::config::Prompts;
use crate::context::{AssembledContext, KeywordTallies, NearbyLines};
use crate::timecode::format_timestamp;
use crate::video::{ConversationTurn, VideoContext};
use std::collections::HashMap;

/// Rendered when no transcript lines fall near the current position.
const NO_NEARBY_FALLBACK: &str = "(no transcript lines near the current position)";

/// Rendered when the keyword scan found nothing.
const NO_KEYWORDS_FALLBACK: &str = "none";

/// Rendered when the conversation has no prior turns.
const NO_HISTORY_FALLBACK: &str = "(start of conversation)";

/// Builds the instruction string handed to the generation service.
pub struct PromptBuilder {
    prompts: Prompts,
    history_turns: usize,
}

impl PromptBuilder {
    pub fn new(prompts: Prompts, history_turns: usize) -> Self {
        Self {
            prompts,
            history_turns,
        }
    }

    /// Render the full instruction for one request.
    pub fn build(
        &self,
        video: &VideoContext,
        context: &AssembledContext,
        history: &[ConversationTurn],
        message: &str,
        current_time: u32,
    ) -> String {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), video.title.clone());
        vars.insert("description".to_string(), video.description.clone());
        vars.insert(
            "duration".to_string(),
            format_timestamp(video.duration_seconds as i64),
        );
        vars.insert(
            "current_time".to_string(),
            format_timestamp(current_time as i64),
        );
        vars.insert("sections".to_string(), context.sections_block.clone());
        vars.insert("nearby".to_string(), format_nearby(&context.nearby));
        vars.insert(
            "transcript".to_string(),
            context.transcript_block.clone(),
        );
        vars.insert("keywords".to_string(), format_keywords(&context.keywords));
        vars.insert(
            "history".to_string(),
            format_history(history, self.history_turns),
        );
        vars.insert("question".to_string(), message.to_string());

        self.prompts
            .render_with_custom(&self.prompts.chat.instruction, &vars)
    }
}

fn format_nearby(nearby: &NearbyLines) -> String {
    match nearby {
        NearbyLines::Found(lines) => lines.join("\n"),
        NearbyLines::Empty => NO_NEARBY_FALLBACK.to_string(),
    }
}

/// Report which vocabulary terms are present, grouped by vocabulary.
fn format_keywords(tallies: &KeywordTallies) -> String {
    if tallies.is_empty() {
        return NO_KEYWORDS_FALLBACK.to_string();
    }

    let mut groups = Vec::new();
    for (label, terms) in [
        ("code", &tallies.code_terms),
        ("concepts", &tallies.concepts),
        ("actions", &tallies.action_verbs),
        ("sequencing", &tallies.sequencing_words),
    ] {
        if !terms.is_empty() {
            groups.push(format!("{}: {}", label, terms.join(", ")));
        }
    }
    groups.join("; ")
}

/// Format the most-recent `max_turns` turns, oldest first.
fn format_history(history: &[ConversationTurn], max_turns: usize) -> String {
    if history.is_empty() || max_turns == 0 {
        return NO_HISTORY_FALLBACK.to_string();
    }

    let start = history.len().saturating_sub(max_turns);
    history[start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContextSettings, Prompts, VocabularySettings};
    use crate::context::{BudgetProfile, ContextAssembler};

    fn sample_video() -> VideoContext {
        VideoContext {
            title: "Async Rust Deep Dive".to_string(),
            description: "Channels and executors".to_string(),
            duration_seconds: 1800,
            sections: vec![],
            transcript: "[0:30] first we build the function".to_string(),
        }
    }

    fn build(video: &VideoContext, history: &[ConversationTurn], message: &str) -> String {
        let assembler =
            ContextAssembler::new(ContextSettings::default(), VocabularySettings::default());
        let context = assembler.assemble(video, 30, BudgetProfile::Conversational);
        PromptBuilder::new(Prompts::default(), 6).build(video, &context, history, message, 30)
    }

    #[test]
    fn test_prompt_contains_metadata_and_question() {
        let prompt = build(&sample_video(), &[], "what is an executor?");
        assert!(prompt.contains("Async Rust Deep Dive"));
        assert!(prompt.contains("Duration: 30:00"));
        assert!(prompt.contains("Current playback position: 0:30"));
        assert!(prompt.contains("User Question: what is an executor?"));
    }

    #[test]
    fn test_prompt_defaults_for_missing_fields() {
        let video = VideoContext::default();
        let prompt = build(&video, &[], "hello world question");
        assert!(prompt.contains("Unknown Video"));
        assert!(prompt.contains("No description available"));
        assert!(prompt.contains("No sections available"));
    }

    #[test]
    fn test_history_bounded_to_tail() {
        let history: Vec<ConversationTurn> = (0..10)
            .map(|i| ConversationTurn::user(format!("question {}", i)))
            .collect();

        let rendered = format_history(&history, 4);
        assert!(!rendered.contains("question 5"));
        assert!(rendered.contains("question 6"));
        assert!(rendered.contains("question 9"));
    }

    #[test]
    fn test_history_empty_fallback() {
        assert_eq!(format_history(&[], 6), NO_HISTORY_FALLBACK);
    }

    #[test]
    fn test_keyword_line_present() {
        let prompt = build(&sample_video(), &[], "q");
        // "build" and "function" appear in the transcript.
        assert!(prompt.contains("code: function"));
        assert!(prompt.contains("actions: build"));
    }

    #[test]
    fn test_nearby_fallback_rendered() {
        let video = VideoContext {
            transcript: "no markers in this transcript".to_string(),
            ..sample_video()
        };
        let prompt = build(&video, &[], "q");
        assert!(prompt.contains(NO_NEARBY_FALLBACK));
    }
}
