//! Video-side data model shared across the chat pipeline.
//!
//! Everything here is constructed fresh per request and never outlives it.
//! Upstream data (YouTube metadata, analysis output, client payloads) is not
//! trusted: section bounds get clamped and missing fields fall back to
//! documented defaults instead of erroring.

use serde::{Deserialize, Serialize};

/// Fallback title when metadata is missing.
pub const DEFAULT_TITLE: &str = "Unknown Video";
/// Fallback description when metadata is missing.
pub const DEFAULT_DESCRIPTION: &str = "No description available";
/// Placeholder when no transcript could be fetched.
pub const DEFAULT_TRANSCRIPT: &str = "No transcript available";

/// Everything the pipeline knows about one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration_seconds: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Plain text, or lines prefixed with `[M:SS]` markers.
    #[serde(default)]
    pub transcript: String,
}

impl VideoContext {
    /// Fill empty fields with defaults and clamp section bounds.
    ///
    /// The pipeline always normalizes before use, so downstream code can
    /// assume `0 <= start <= end <= duration` for every section.
    pub fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = DEFAULT_TITLE.to_string();
        }
        if self.description.trim().is_empty() {
            self.description = DEFAULT_DESCRIPTION.to_string();
        }
        if self.transcript.trim().is_empty() {
            self.transcript = DEFAULT_TRANSCRIPT.to_string();
        }
        let duration = self.duration_seconds;
        for section in &mut self.sections {
            section.clamp_to(duration);
        }
        self
    }
}

impl Default for VideoContext {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            duration_seconds: 0,
            sections: Vec::new(),
            transcript: DEFAULT_TRANSCRIPT.to_string(),
        }
    }
}

/// A labeled time range of the video, supplied by an external analysis step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// 1-based position in the breakdown.
    pub index: u32,
    pub title: String,
    pub start_time: u32,
    pub end_time: u32,
    #[serde(default)]
    pub description: String,
    /// Optional transcript excerpt for this range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Section {
    /// Force `0 <= start <= end <= duration`, whatever upstream sent.
    pub fn clamp_to(&mut self, duration: u32) {
        self.start_time = self.start_time.min(duration);
        self.end_time = self.end_time.clamp(self.start_time, duration);
    }
}

/// Who said a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One prior message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_clamp_inverted_bounds() {
        let mut section = Section {
            index: 1,
            title: "Test".to_string(),
            start_time: 500,
            end_time: 400,
            description: String::new(),
            excerpt: None,
        };
        section.clamp_to(450);
        assert!(section.start_time <= section.end_time);
        assert!(section.end_time <= 450);
        assert_eq!(section.start_time, 450);
        assert_eq!(section.end_time, 450);
    }

    #[test]
    fn test_section_clamp_valid_bounds_untouched() {
        let mut section = Section {
            index: 2,
            title: "Test".to_string(),
            start_time: 30,
            end_time: 90,
            description: String::new(),
            excerpt: None,
        };
        section.clamp_to(600);
        assert_eq!((section.start_time, section.end_time), (30, 90));
    }

    #[test]
    fn test_normalized_fills_defaults() {
        let video = VideoContext {
            title: "  ".to_string(),
            description: String::new(),
            duration_seconds: 100,
            sections: vec![],
            transcript: String::new(),
        }
        .normalized();

        assert_eq!(video.title, DEFAULT_TITLE);
        assert_eq!(video.description, DEFAULT_DESCRIPTION);
        assert_eq!(video.transcript, DEFAULT_TRANSCRIPT);
    }

    #[test]
    fn test_normalized_clamps_sections() {
        let video = VideoContext {
            title: "t".to_string(),
            description: "d".to_string(),
            duration_seconds: 450,
            sections: vec![Section {
                index: 1,
                title: "s".to_string(),
                start_time: 500,
                end_time: 400,
                description: String::new(),
                excerpt: None,
            }],
            transcript: "x".to_string(),
        }
        .normalized();

        let s = &video.sections[0];
        assert!(s.start_time <= s.end_time && s.end_time <= 450);
    }
}
