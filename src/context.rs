//! Context assembly for the chat pipeline.
//!
//! Transcripts can be enormous, so the generation service never sees one
//! unbounded. The assembler selects and formats what goes into the prompt:
//! transcript lines near the current playback position, a per-section
//! breakdown with bounded excerpts, and the transcript itself capped at a
//! character budget. All of it is pure string transformation over
//! request-scoped data.

use crate::config::{ContextSettings, VocabularySettings};
use crate::timecode::{format_timestamp, parse_timestamp, TIMESTAMP_PATTERN};
use crate::video::{Section, VideoContext};
use regex::Regex;

/// Appended when the transcript exceeds its budget.
pub const TRUNCATION_MARKER: &str = "\n[transcript truncated]";

/// Appended when a section excerpt is cut at the ceiling.
pub const EXCERPT_MARKER: &str = "...";

/// Size budget applied when assembling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetProfile {
    /// Tight budgets for back-and-forth chat.
    #[default]
    Conversational,
    /// Larger budgets for summarization and in-depth questions.
    DeepAnalysis,
}

/// Result of the nearby-window extraction.
///
/// `Empty` is distinct from "not computed": it tells callers the operation
/// ran and found nothing, so they can render an explicit fallback instead
/// of omitting the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NearbyLines {
    Found(Vec<String>),
    Empty,
}

/// Which vocabulary terms were found in the transcript.
#[derive(Debug, Clone, Default)]
pub struct KeywordTallies {
    pub code_terms: Vec<String>,
    pub concepts: Vec<String>,
    pub action_verbs: Vec<String>,
    pub sequencing_words: Vec<String>,
}

impl KeywordTallies {
    pub fn is_empty(&self) -> bool {
        self.code_terms.is_empty()
            && self.concepts.is_empty()
            && self.action_verbs.is_empty()
            && self.sequencing_words.is_empty()
    }
}

/// Everything the prompt builder needs, assembled under budget.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// Formatted section blocks, or "No sections available".
    pub sections_block: String,
    /// Transcript lines near the current playback position.
    pub nearby: NearbyLines,
    /// Budget-capped transcript text.
    pub transcript_block: String,
    /// Whether transcript truncation occurred.
    pub transcript_truncated: bool,
    /// Vocabulary terms present in the transcript.
    pub keywords: KeywordTallies,
}

/// Selects and formats the context subset presented to the generation step.
pub struct ContextAssembler {
    settings: ContextSettings,
    vocabulary: VocabularySettings,
    line_marker_regex: Regex,
}

impl ContextAssembler {
    pub fn new(settings: ContextSettings, vocabulary: VocabularySettings) -> Self {
        // A line is timestamped when it opens with a bracketed marker.
        let line_marker_regex = Regex::new(&format!(r"^\s*\[{}\]", TIMESTAMP_PATTERN))
            .expect("Invalid line marker regex");
        Self {
            settings,
            vocabulary,
            line_marker_regex,
        }
    }

    /// Assemble context for one request.
    pub fn assemble(
        &self,
        video: &VideoContext,
        current_time: u32,
        profile: BudgetProfile,
    ) -> AssembledContext {
        let (transcript_budget, excerpt_limit) = match profile {
            BudgetProfile::Conversational => (
                self.settings.transcript_budget_chars,
                self.settings.excerpt_chars,
            ),
            BudgetProfile::DeepAnalysis => (
                self.settings.deep_transcript_budget_chars,
                self.settings.deep_excerpt_chars,
            ),
        };

        let sections_block = self.sections_block(&video.sections, excerpt_limit);
        let nearby = self.nearby_lines(&video.transcript, current_time);
        let (transcript_block, transcript_truncated) =
            truncate_transcript(&video.transcript, transcript_budget);
        let keywords = self.scan_keywords(&video.transcript);

        AssembledContext {
            sections_block,
            nearby,
            transcript_block,
            transcript_truncated,
            keywords,
        }
    }

    /// Extract transcript lines whose timestamp falls within the configured
    /// half-window of `target`, in original order, capped at the configured
    /// line count. Lines without a parseable marker never match.
    pub fn nearby_lines(&self, transcript: &str, target: u32) -> NearbyLines {
        let window = self.settings.nearby_window_seconds;
        let lo = target.saturating_sub(window);
        let hi = target.saturating_add(window);

        let lines: Vec<String> = transcript
            .lines()
            .filter(|line| {
                self.line_marker_regex.is_match(line)
                    && parse_timestamp(line).is_some_and(|ts| ts >= lo && ts <= hi)
            })
            .take(self.settings.nearby_max_lines)
            .map(|line| line.trim().to_string())
            .collect();

        if lines.is_empty() {
            NearbyLines::Empty
        } else {
            NearbyLines::Found(lines)
        }
    }

    /// Format all sections into one block, clamping bounds and truncating
    /// excerpts at `excerpt_limit` chars. Output order = input order.
    pub fn sections_block(&self, sections: &[Section], excerpt_limit: usize) -> String {
        if sections.is_empty() {
            return "No sections available".to_string();
        }

        sections
            .iter()
            .map(|section| self.format_section(section, excerpt_limit))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_section(&self, section: &Section, excerpt_limit: usize) -> String {
        let mut block = format!(
            "{}. {} ({} - {}): {}",
            section.index,
            section.title,
            format_timestamp(section.start_time as i64),
            format_timestamp(section.end_time as i64),
            section.description,
        );

        if let Some(excerpt) = &section.excerpt {
            let excerpt = excerpt.trim();
            if !excerpt.is_empty() {
                block.push_str("\n   > ");
                block.push_str(&truncate_chars(excerpt, excerpt_limit));
            }
        }

        block
    }

    /// Case-insensitive substring scan of the transcript against the
    /// configured vocabularies. O(vocabulary x transcript), which is fine:
    /// the vocabularies are a few dozen fixed terms.
    pub fn scan_keywords(&self, transcript: &str) -> KeywordTallies {
        let haystack = transcript.to_lowercase();
        let present = |terms: &[String]| -> Vec<String> {
            terms
                .iter()
                .filter(|term| haystack.contains(&term.to_lowercase()))
                .cloned()
                .collect()
        };

        KeywordTallies {
            code_terms: present(&self.vocabulary.code_terms),
            concepts: present(&self.vocabulary.concepts),
            action_verbs: present(&self.vocabulary.action_verbs),
            sequencing_words: present(&self.vocabulary.sequencing_words),
        }
    }
}

/// Cap the transcript at `budget` chars, appending a marker when cut.
///
/// A safety valve, not a summarizer: the result never exceeds
/// budget + marker length (in chars), and the kept text is always a prefix
/// of the original.
pub fn truncate_transcript(transcript: &str, budget: usize) -> (String, bool) {
    if transcript.chars().count() <= budget {
        return (transcript.to_string(), false);
    }

    let mut out: String = transcript.chars().take(budget).collect();
    out.push_str(TRUNCATION_MARKER);
    (out, true)
}

/// Take a `limit`-char prefix, appending an ellipsis marker when cut.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(EXCERPT_MARKER);
    out
}
