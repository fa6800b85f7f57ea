//! Text-generation providers.
//!
//! Section content comes from a language model behind the [`TextGenerator`]
//! trait. Each call carries the model identifier, a fixed system instruction
//! and a per-section user instruction; the provider answers with plain text
//! or a typed [`GenerationError`].
//!
//! ## Providers
//!
//! - **OpenAI** (and compatible APIs) via chat completions
//! - **Ollama** for local models
//! - **Dry run**, which produces placeholder text without any network access

mod dry_run;
mod ollama;
mod openai;

pub use dry_run::DryRunGenerator;
pub use ollama::OllamaGenerator;
pub use openai::OpenAIGenerator;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::AiConfig;

/// One request for section content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Model identifier
    pub model: String,

    /// System instruction, constant for the lifetime of a workflow
    pub system: String,

    /// User instruction for this section
    pub user: String,

    /// Section being generated
    pub section: String,
}

/// Trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Generation error types.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("no content in response")]
    EmptyResponse,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("missing API key for {0}")]
    MissingApiKey(String),
}

/// Known provider backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions (or a compatible API)
    #[default]
    #[value(name = "openai")]
    OpenAI,
    /// Local Ollama server
    Ollama,
}

impl ProviderKind {
    /// Whether this provider needs an API key.
    pub fn requires_api_key(self) -> bool {
        matches!(self, Self::OpenAI)
    }

    /// Provider name as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the configured generator.
pub fn generator_from_config(
    config: &AiConfig,
) -> Result<Box<dyn TextGenerator>, GenerationError> {
    let generator: Box<dyn TextGenerator> = match config.provider {
        ProviderKind::OpenAI => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| GenerationError::MissingApiKey("openai".to_string()))?;

            let mut provider = OpenAIGenerator::new(api_key);
            if let Some(ref url) = config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
        ProviderKind::Ollama => {
            let mut provider = OllamaGenerator::new();
            if let Some(ref url) = config.base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
    };

    tracing::debug!(provider = generator.name(), model = %config.model, "Using text generator");
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_requires_key() {
        let config = AiConfig { api_key: None, ..AiConfig::default() };
        let result = generator_from_config(&config);
        assert!(matches!(result, Err(GenerationError::MissingApiKey(_))));
    }

    #[test]
    fn test_openai_with_key() {
        let config = AiConfig { api_key: Some("sk-test".to_string()), ..AiConfig::default() };
        let generator = generator_from_config(&config).unwrap();
        assert_eq!(generator.name(), "openai");
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config =
            AiConfig { provider: ProviderKind::Ollama, api_key: None, ..AiConfig::default() };
        let generator = generator_from_config(&config).unwrap();
        assert_eq!(generator.name(), "ollama");
    }

    #[test]
    fn test_timeout_message() {
        let err = GenerationError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "timed out after 30s");
    }
}
