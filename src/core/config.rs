//! Configuration management for Planwright.
//!
//! Handles loading and saving configuration from TOML files, with
//! environment variable overrides for credentials and model selection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::ProviderKind;
use crate::plan::{
    ExportFormat, SectionTemplate, TemplateError, DEFAULT_SECTIONS, DEFAULT_TITLE,
};

/// Local config file name, looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".planwright.toml";

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "PLANWRIGHT_MODEL";

/// Environment variable overriding the provider.
pub const PROVIDER_ENV: &str = "PLANWRIGHT_PROVIDER";

/// Models offered in the interactive setup.
pub const SUGGESTED_MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4o-mini", "gpt-4o"];

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation settings
    pub ai: AiConfig,

    /// Plan template and export settings
    pub plan: PlanConfig,

    /// UI/TUI settings
    pub ui: UiConfig,
}

/// Text-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider backend (openai, ollama)
    pub provider: ProviderKind,

    /// Model identifier sent with every request
    pub model: String,

    /// API credential (required for openai)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the provider's base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Timeout for a single generation call, in seconds
    pub timeout_secs: u64,
}

/// Plan template and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Document title
    pub title: String,

    /// Section names, in order
    pub sections: Vec<String>,

    /// Directory exported plans are written to
    pub output_dir: PathBuf,

    /// Export format
    pub format: ExportFormat,
}

/// UI/TUI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Color theme name (built-in: default, dracula, nord)
    pub theme: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.planwright.toml` in current directory
    /// 2. `~/.config/planwright/config.toml`
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Locate the config file that `load` would read.
    pub fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        Self::global_config_path().filter(|path| path.exists())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = non_empty_env(MODEL_ENV) {
            self.ai.model = model;
        }
        if let Some(provider) = non_empty_env(PROVIDER_ENV) {
            match provider.to_lowercase().as_str() {
                "openai" => self.ai.provider = ProviderKind::OpenAI,
                "ollama" => self.ai.provider = ProviderKind::Ollama,
                other => tracing::warn!(provider = other, "Ignoring unknown provider override"),
            }
        }
    }

    /// Check that a credential and model are present before generating.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ai.model.trim().is_empty() {
            anyhow::bail!("No model configured. Set ai.model or {MODEL_ENV}.");
        }

        let has_key = self.ai.api_key.as_deref().is_some_and(|key| !key.trim().is_empty());
        if self.ai.provider.requires_api_key() && !has_key {
            anyhow::bail!(
                "No API key configured for {}. Set {API_KEY_ENV} or ai.api_key.",
                self.ai.provider
            );
        }

        Ok(())
    }

    /// Build the section template from configuration.
    pub fn template(&self) -> Result<SectionTemplate, TemplateError> {
        SectionTemplate::new(self.plan.sections.iter().cloned())
    }

    /// Generation timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.ai.timeout_secs.max(1))
    }

    /// Copy of this configuration safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.ai.api_key.is_some() {
            config.ai.api_key = Some("********".to_string());
        }
        config
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("planwright"))
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            sections: DEFAULT_SECTIONS.iter().map(|s| (*s).to_string()).collect(),
            output_dir: PathBuf::from("."),
            format: ExportFormat::Markdown,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: "default".to_string() }
    }
}
