//! Configuration settings for Spole.
//!
//! Every tunable the pipeline consumes lives here and is threaded into the
//! components at construction. Nothing reads ambient global state, so two
//! differently-configured pipelines can coexist in one process.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub generation: GenerationSettings,
    pub context: ContextSettings,
    pub citations: CitationSettings,
    pub vocabulary: VocabularySettings,
    pub youtube: YoutubeSettings,
    pub store: StoreSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.spole".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Settings for the external generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub api_base: String,
    /// API key override; falls back to the GROQ_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Model to use for answer generation.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens per response.
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Context assembly budgets and windows.
///
/// The `deep_*` variants apply to the deep-analysis budget profile; the
/// plain variants to conversational requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// Half-window in seconds around the current playback position.
    pub nearby_window_seconds: u32,
    /// Maximum nearby transcript lines to include.
    pub nearby_max_lines: usize,
    /// Transcript character budget for conversational requests.
    pub transcript_budget_chars: usize,
    /// Transcript character budget for deep-analysis requests.
    pub deep_transcript_budget_chars: usize,
    /// Section excerpt ceiling (chars) for conversational requests.
    pub excerpt_chars: usize,
    /// Section excerpt ceiling (chars) for deep-analysis requests.
    pub deep_excerpt_chars: usize,
    /// Most-recent conversation turns carried into the prompt.
    pub history_turns: usize,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            nearby_window_seconds: 45,
            nearby_max_lines: 8,
            transcript_budget_chars: 4_000,
            deep_transcript_budget_chars: 12_000,
            excerpt_chars: 200,
            deep_excerpt_chars: 500,
            history_turns: 6,
        }
    }
}

/// Citation extraction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationSettings {
    /// Default citation segment length in seconds.
    pub segment_seconds: u32,
    /// Maximum citations per response.
    pub max_citations: usize,
    /// Characters of surrounding text captured per citation.
    pub snippet_radius_chars: usize,
}

impl Default for CitationSettings {
    fn default() -> Self {
        Self {
            segment_seconds: 30,
            max_citations: 3,
            snippet_radius_chars: 80,
        }
    }
}

/// Keyword vocabularies scanned against the transcript as a cheap content
/// signal for the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySettings {
    pub code_terms: Vec<String>,
    pub concepts: Vec<String>,
    pub action_verbs: Vec<String>,
    pub sequencing_words: Vec<String>,
}

impl Default for VocabularySettings {
    fn default() -> Self {
        let to_vec =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            code_terms: to_vec(&[
                "function", "variable", "loop", "array", "class", "method", "compiler",
                "syntax", "debug", "api",
            ]),
            concepts: to_vec(&[
                "thread", "async", "concurrency", "mutex", "channel", "memory",
                "performance", "algorithm", "recursion", "type system",
            ]),
            action_verbs: to_vec(&[
                "build", "install", "configure", "deploy", "run", "create", "implement",
                "refactor", "test",
            ]),
            sequencing_words: to_vec(&[
                "first", "then", "next", "after that", "finally", "before", "step",
            ]),
        }
    }
}

/// YouTube provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key (optional; metadata falls back to defaults without it).
    pub api_key: Option<String>,
    /// Base URL of the transcript sidecar service.
    pub transcript_service_url: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            transcript_service_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Processed-video store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database of processed videos.
    pub sqlite_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.spole/videos.db".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SpoleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spole")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.store.sqlite_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let settings = Settings::default();
        assert!(settings.context.excerpt_chars < settings.context.deep_excerpt_chars);
        assert!(
            settings.context.transcript_budget_chars
                < settings.context.deep_transcript_budget_chars
        );
        assert!(settings.citations.max_citations > 0);
        assert!(!settings.vocabulary.code_terms.is_empty());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.generation.model, settings.generation.model);
        assert_eq!(parsed.context.history_turns, settings.context.history_turns);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Settings = toml::from_str("[generation]\nmodel = \"llama-3.3-70b\"\n").unwrap();
        assert_eq!(parsed.generation.model, "llama-3.3-70b");
        assert_eq!(parsed.citations.max_citations, 3);
    }
}
