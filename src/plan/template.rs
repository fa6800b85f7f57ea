//! The ordered list of sections a plan is generated from.

use std::collections::HashSet;

use super::error::TemplateError;

/// Sections of a standard business plan, in document order.
pub const DEFAULT_SECTIONS: &[&str] = &[
    "Executive Summary",
    "Company Description",
    "Market Analysis",
    "Organization & Management",
    "Service or Product Line",
    "Marketing & Sales",
    "Funding Request",
    "Financial Projections",
    "Appendix",
];

/// Fixed, ordered sequence of unique section names.
///
/// Order defines both the generation sequence and the document sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTemplate {
    sections: Vec<String>,
}

impl SectionTemplate {
    /// Build a template, rejecting empty, blank, or duplicate section names.
    pub fn new<I, S>(sections: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections: Vec<String> =
            sections.into_iter().map(|s| s.into().trim().to_string()).collect();

        if sections.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, name) in sections.iter().enumerate() {
            if name.is_empty() {
                return Err(TemplateError::BlankName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(TemplateError::Duplicate(name.clone()));
            }
        }

        Ok(Self { sections })
    }

    /// Number of sections (N).
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; a template holds at least one section.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section name at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(String::as_str)
    }

    /// Index of the last section.
    pub fn last_index(&self) -> usize {
        self.sections.len() - 1
    }

    /// Iterate section names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(String::as_str)
    }

    /// Section names as a slice.
    pub fn names(&self) -> &[String] {
        &self.sections
    }
}

impl Default for SectionTemplate {
    fn default() -> Self {
        Self { sections: DEFAULT_SECTIONS.iter().map(|s| (*s).to_string()).collect() }
    }
}
