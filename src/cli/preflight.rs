//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, SpoleError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Chatting requires the generation API key.
    Chat,
    /// Serving answers chat requests, so it needs the same key.
    Serve,
    /// Processing works without keys (metadata degrades to defaults).
    Process,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Chat | Operation::Serve => {
            check_generation_key(settings)?;
        }
        Operation::Process => {
            // No hard requirements; missing keys degrade gracefully.
        }
    }
    Ok(())
}

/// Check if the generation API key is configured, in config or environment.
fn check_generation_key(settings: &Settings) -> Result<()> {
    if settings
        .generation
        .api_key
        .as_deref()
        .is_some_and(|k| !k.is_empty())
    {
        return Ok(());
    }

    match std::env::var("GROQ_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SpoleError::Config(
            "GROQ_API_KEY is empty. Set it with: export GROQ_API_KEY='gsk_...'".to_string(),
        )),
        Err(_) => Err(SpoleError::Config(
            "GROQ_API_KEY not set. Set it with: export GROQ_API_KEY='gsk_...'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_has_no_requirements() {
        assert!(check(Operation::Process, &Settings::default()).is_ok());
    }

    #[test]
    fn test_config_key_satisfies_chat() {
        let mut settings = Settings::default();
        settings.generation.api_key = Some("gsk_test".to_string());
        assert!(check(Operation::Chat, &settings).is_ok());
    }
}
