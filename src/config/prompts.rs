//! Prompt templates for Spole.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub chat: ChatPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the video chat pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    /// Full instruction template handed to the generation service.
    pub instruction: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            instruction: r#"You are an AI assistant that helps users understand and analyze video content. You have access to video metadata, sections, and transcript information.

Video Information:
- Title: {{title}}
- Description: {{description}}
- Duration: {{duration}}
- Current playback position: {{current_time}}

Video Sections:
{{sections}}

Transcript near the current position:
{{nearby}}

Transcript:
{{transcript}}

Content signals detected in the transcript: {{keywords}}

Recent conversation:
{{history}}

Instructions:
1. Answer questions about the video content based on the provided information
2. Reference specific timestamps when relevant (format: MM:SS)
3. If asked about visual content, make reasonable inferences based on the title, description, and sections
4. Provide helpful, detailed responses that cite specific parts of the video
5. If the question cannot be answered from the available information, say so clearly

User Question: {{question}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a template with both provided variables and custom config
    /// variables. Provided variables take precedence.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.chat.instruction.contains("{{question}}"));
        assert!(prompts.chat.instruction.contains("{{transcript}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "At {{current_time}} of {{duration}}.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("current_time".to_string(), "1:30".to_string());
        vars.insert("duration".to_string(), "10:00".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "At 1:30 of 10:00.");
    }

    #[test]
    fn test_custom_variables_merge() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("tone".to_string(), "casual".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("question".to_string(), "why?".to_string());

        let out = prompts.render_with_custom("{{tone}}: {{question}}", &vars);
        assert_eq!(out, "casual: why?");
    }
}
