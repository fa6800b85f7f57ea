//! Prompt construction for section generation.

use super::profile::BusinessProfile;

/// Build the system instruction shared by every section of a plan.
pub fn system_instruction() -> String {
    r"Generate a comprehensive business plan.
The user is planning to start a business and needs a structured plan.
1. Understand the business details provided by the user.
2. Ensure the content is organized and coherent.
3. Stay within the scope of a business plan.
Based on the provided details, create a detailed section of a business plan.
Business name, industry, core product/service, problem solved, and any additional information."
        .to_string()
}

/// Build the per-section user instruction.
pub fn section_instruction(section: &str, profile: &BusinessProfile) -> String {
    format!(
        "Elaborate on the '{}' section for {}, a {} business offering {} to solve {}. \
         Additional Info: {}",
        section,
        profile.name,
        profile.industry,
        profile.core_product,
        profile.problem_solved,
        profile.additional_info
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_instruction_includes_profile() {
        let profile = BusinessProfile::new("Acme Bikes", "retail", "e-bikes", "urban commuting")
            .with_additional_info("Founded in 2024");

        let prompt = section_instruction("Market Analysis", &profile);
        assert_eq!(
            prompt,
            "Elaborate on the 'Market Analysis' section for Acme Bikes, a retail business \
             offering e-bikes to solve urban commuting. Additional Info: Founded in 2024"
        );
    }

    #[test]
    fn test_system_instruction_is_stable() {
        assert_eq!(system_instruction(), system_instruction());
        assert!(system_instruction().starts_with("Generate a comprehensive business plan."));
    }
}
