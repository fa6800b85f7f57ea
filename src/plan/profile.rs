//! Business profile captured before generation starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ProfileError;

/// User-supplied facts about the business.
///
/// All fields are plain text. Only the first four are required;
/// `additional_info` may be left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    /// Business name
    pub name: String,

    /// Industry the business operates in
    pub industry: String,

    /// Core product or service
    pub core_product: String,

    /// Problem the product or service solves
    pub problem_solved: String,

    /// Free-text additional information
    pub additional_info: String,
}

impl BusinessProfile {
    /// Create a profile from its required fields.
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        core_product: impl Into<String>,
        problem_solved: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            core_product: core_product.into(),
            problem_solved: problem_solved.into(),
            additional_info: String::new(),
        }
    }

    /// Attach additional information.
    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }

    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ProfileError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ProfileError::Parse { path: path.to_path_buf(), source })
    }

    /// Check that every required field has content.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let required = [
            ("name", &self.name),
            ("industry", &self.industry),
            ("core_product", &self.core_product),
            ("problem_solved", &self.problem_solved),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProfileError::EmptyField(field));
            }
        }

        Ok(())
    }

    /// Whether every required field has content.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Overlay non-empty fields from `other` onto this profile.
    pub fn merge(mut self, other: Self) -> Self {
        fn overlay(target: &mut String, value: String) {
            if !value.trim().is_empty() {
                *target = value;
            }
        }

        overlay(&mut self.name, other.name);
        overlay(&mut self.industry, other.industry);
        overlay(&mut self.core_product, other.core_product);
        overlay(&mut self.problem_solved, other.problem_solved);
        overlay(&mut self.additional_info, other.additional_info);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BusinessProfile {
        BusinessProfile::new("Acme Bikes", "retail", "e-bikes", "urban commuting")
    }

    #[test]
    fn test_validate_complete_profile() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_additional_info_is_optional() {
        let profile = sample();
        assert!(profile.additional_info.is_empty());
        assert!(profile.is_complete());
    }

    #[test]
    fn test_validate_reports_first_empty_field() {
        let mut profile = sample();
        profile.industry = "   ".to_string();

        match profile.validate() {
            Err(ProfileError::EmptyField(field)) => assert_eq!(field, "industry"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_merge_keeps_existing_when_overlay_blank() {
        let base = sample().with_additional_info("family owned");
        let overlay = BusinessProfile { name: "Acme Cycles".to_string(), ..Default::default() };

        let merged = base.merge(overlay);
        assert_eq!(merged.name, "Acme Cycles");
        assert_eq!(merged.industry, "retail");
        assert_eq!(merged.additional_info, "family owned");
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(
            &path,
            r#"
name = "Acme Bikes"
industry = "retail"
core_product = "e-bikes"
problem_solved = "urban commuting"
"#,
        )
        .unwrap();

        let profile = BusinessProfile::load(&path).unwrap();
        assert_eq!(profile, sample());
    }

    #[test]
    fn test_load_missing_file() {
        let result = BusinessProfile::load(Path::new("/nonexistent/profile.toml"));
        assert!(matches!(result, Err(ProfileError::Read { .. })));
    }
}
