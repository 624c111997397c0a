//! Configuration management for Spole.

mod prompts;
mod settings;

pub use prompts::{ChatPrompts, Prompts};
pub use settings::{
    CitationSettings, ContextSettings, GeneralSettings, GenerationSettings, PromptSettings,
    Settings, StoreSettings, VocabularySettings, YoutubeSettings,
};
