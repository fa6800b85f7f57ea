//! Offline generator for dry runs.

use async_trait::async_trait;

use super::{GenerationError, GenerationRequest, TextGenerator};

/// Produces placeholder content without contacting any service.
///
/// Lets the whole workflow, including export, be exercised without
/// credentials or network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunGenerator;

impl DryRunGenerator {
    /// Create a dry-run generator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for DryRunGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        Ok(format!(
            "DRY RUN: {} would be generated with model {}.\n\nPrompt: {}",
            request.section, request.model, request.user
        ))
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_mentions_section() {
        let request = GenerationRequest {
            model: "gpt-3.5-turbo".to_string(),
            system: String::new(),
            user: "Elaborate on the 'Appendix' section".to_string(),
            section: "Appendix".to_string(),
        };

        let text = DryRunGenerator::new().generate(&request).await.unwrap();
        assert!(text.starts_with("DRY RUN: Appendix"));
        assert!(text.contains("gpt-3.5-turbo"));
    }
}
