//! Citation extraction from generated text.
//!
//! Generated answers reference moments as `M:SS` timestamps. This module
//! scans a response for timestamp-shaped substrings and turns them into
//! validated, deduplicated, time-bounded citations into the video.
//!
//! Matching is permissive on purpose: a ratio like "3:25" that happens to
//! fall inside the video is accepted as a citation. The upstream text gives
//! no way to tell them apart, and guessing would reject real references.

use crate::config::CitationSettings;
use crate::timecode::timestamp_regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A validated timestamp reference extracted from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// The timestamp as it appeared in the text (e.g. "2:05").
    pub display_text: String,
    /// Start of the cited segment, seconds.
    pub start_time: u32,
    /// End of the cited segment, seconds. Never exceeds the video duration.
    pub end_time: u32,
    /// Surrounding response text, for rendering the citation in context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_snippet: Option<String>,
}

/// Extracts citations from generated response text.
pub struct CitationExtractor {
    segment_seconds: u32,
    max_citations: usize,
    snippet_radius_chars: usize,
}

impl CitationExtractor {
    pub fn new(settings: CitationSettings) -> Self {
        Self {
            segment_seconds: settings.segment_seconds,
            max_citations: settings.max_citations,
            snippet_radius_chars: settings.snippet_radius_chars,
        }
    }

    /// Scan `text` left-to-right and produce citations bounded by
    /// `duration` seconds.
    ///
    /// Out-of-bounds timestamps (a hallucination guard) and repeated start
    /// times are discarded; the first occurrence of a start time wins.
    /// Output order is order of appearance. Returns an empty list, never an
    /// error, when nothing usable is found.
    pub fn extract(&self, text: &str, duration: u32) -> Vec<Citation> {
        let mut citations = Vec::new();
        let mut seen_starts: HashSet<u32> = HashSet::new();

        for caps in timestamp_regex().captures_iter(text) {
            if citations.len() >= self.max_citations {
                break;
            }

            let (Ok(minutes), Ok(seconds)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>())
            else {
                continue;
            };
            let start = minutes * 60 + seconds;

            // Inclusive bound: at duration 0 only an exact 0:00 survives.
            if start > duration {
                continue;
            }
            if !seen_starts.insert(start) {
                continue;
            }

            let Some(whole) = caps.get(0) else { continue };
            citations.push(Citation {
                display_text: whole.as_str().to_string(),
                start_time: start,
                end_time: (start + self.segment_seconds).min(duration),
                context_snippet: self.snippet_around(text, whole.start(), whole.end()),
            });
        }

        citations
    }

    /// Cut a trimmed window of up to `snippet_radius_chars` chars on each
    /// side of the match. Walks char boundaries, never byte offsets.
    fn snippet_around(&self, text: &str, match_start: usize, match_end: usize) -> Option<String> {
        if self.snippet_radius_chars == 0 {
            return None;
        }

        let before = &text[..match_start];
        let after = &text[match_end..];

        let from = before
            .char_indices()
            .rev()
            .nth(self.snippet_radius_chars.saturating_sub(1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let to = after
            .char_indices()
            .nth(self.snippet_radius_chars)
            .map(|(i, _)| match_end + i)
            .unwrap_or(text.len());

        let snippet = text[from..to].trim();
        if snippet.is_empty() {
            None
        } else {
            Some(snippet.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CitationExtractor {
        CitationExtractor::new(CitationSettings::default())
    }

    #[test]
    fn test_extracts_and_deduplicates() {
        let citations = extractor().extract("Check 1:30 and also 1:30 again, then 2:05.", 200);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].start_time, 90);
        assert_eq!(citations[1].start_time, 125);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        // 99:59 = 5999s, past the 100s video.
        let citations = extractor().extract("At 99:59 something happens.", 100);
        assert!(citations.is_empty());
    }

    #[test]
    fn test_end_time_clamped_to_duration() {
        let citations = extractor().extract("See 1:30 for the finale.", 100);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].start_time, 90);
        assert_eq!(citations[0].end_time, 100);
    }

    #[test]
    fn test_segment_length_applied() {
        let citations = extractor().extract("See 1:00.", 600);
        assert_eq!(citations[0].end_time, 90);
    }

    #[test]
    fn test_bounds_invariant_holds() {
        let duration = 450;
        let citations = extractor().extract("0:00, 1:03, 7:29, 9:59, 3:2, 88:88", duration);
        for c in &citations {
            assert!(c.start_time <= c.end_time);
            assert!(c.end_time <= duration);
        }
    }

    #[test]
    fn test_order_is_appearance_not_chronological() {
        let citations = extractor().extract("Late 5:00 comes before early 1:00 here.", 600);
        assert_eq!(citations[0].start_time, 300);
        assert_eq!(citations[1].start_time, 60);
    }

    #[test]
    fn test_max_citations_respected() {
        let citations = extractor().extract("0:01 0:02 0:03 0:04 0:05", 600);
        assert_eq!(citations.len(), 3);
        assert_eq!(citations[2].start_time, 3);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        assert!(extractor().extract("no timestamps in this answer", 600).is_empty());
        assert!(extractor().extract("", 600).is_empty());
    }

    #[test]
    fn test_zero_duration_admits_only_zero() {
        let citations = extractor().extract("At 0:00 and 0:01.", 0);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].start_time, 0);
        assert_eq!(citations[0].end_time, 0);
    }

    #[test]
    fn test_display_text_preserved() {
        let citations = extractor().extract("jump to 12:05 now", 1000);
        assert_eq!(citations[0].display_text, "12:05");
    }

    #[test]
    fn test_snippet_surrounds_match() {
        let citations = extractor().extract("The speaker introduces channels at 2:05 with a demo.", 600);
        let snippet = citations[0].context_snippet.as_ref().unwrap();
        assert!(snippet.contains("2:05"));
        assert!(snippet.contains("channels"));
    }

    #[test]
    fn test_snippet_char_safe_with_multibyte_text() {
        let text = "ø".repeat(200) + " 1:30 " + &"ü".repeat(200);
        let citations = extractor().extract(&text, 600);
        assert_eq!(citations.len(), 1);
        assert!(citations[0].context_snippet.is_some());
    }

    #[test]
    fn test_ratio_accepted_when_in_bounds() {
        // Known limitation: "3:25" as a ratio is indistinguishable from a
        // timestamp and is kept when it fits the video.
        let citations = extractor().extract("The aspect ratio is 3:25.", 600);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].start_time, 205);
    }
}
