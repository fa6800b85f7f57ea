//! Ollama local LLM integration.
//!
//! Implements the TextGenerator trait for Ollama (local LLM).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationError, GenerationRequest, TextGenerator};

/// Ollama API provider for local LLM.
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
}

impl OllamaGenerator {
    /// Create a new Ollama provider with default settings.
    ///
    /// Uses `OLLAMA_HOST` if set, otherwise localhost:11434.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: std::env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
        }
    }

    /// Create with a specific base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_body(request: &GenerationRequest) -> OllamaRequest {
        OllamaRequest {
            model: request.model.clone(),
            messages: vec![
                OllamaMessage { role: "system".to_string(), content: request.system.clone() },
                OllamaMessage { role: "user".to_string(), content: request.user.clone() },
            ],
            stream: false,
        }
    }
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = Self::build_body(request);

        let response =
            self.client.post(format!("{}/api/chat", self.base_url)).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let response: OllamaResponse = response.json().await?;
        if response.message.content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(response.message.content)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}
