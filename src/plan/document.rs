//! Document accumulator and export.
//!
//! Collects generated sections in the order they are produced and serializes
//! them into a downloadable artifact once the plan is complete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ExportError;

/// Default document title.
pub const DEFAULT_TITLE: &str = "Business Plan";

/// Base name used for exported files.
const FILE_STEM: &str = "business_plan";

/// Output format for a finished plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Markdown with one `##` heading per section
    #[default]
    Markdown,
    /// Structured JSON
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    /// Suggested filename for an exported plan.
    pub fn filename(self) -> String {
        format!("{FILE_STEM}.{}", self.extension())
    }
}

/// One heading and its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Section heading
    pub heading: String,

    /// Section body (may be empty)
    pub body: String,
}

/// Append-only sink for generated sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAccumulator {
    title: String,
    entries: Vec<SectionEntry>,
}

impl DocumentAccumulator {
    /// Create an empty document with the default title.
    pub fn new() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }

    /// Create an empty document with a custom title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self { title: title.into(), entries: Vec::new() }
    }

    /// Append a heading and body. Empty bodies are allowed.
    pub fn append_section(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.push(SectionEntry { heading: name.into(), body: content.into() });
    }

    /// Drop any earlier entries under `name`, then append the new one.
    ///
    /// Used when a section is regenerated so the document keeps only its
    /// latest text, in generation order.
    pub fn supersede_section(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|entry| entry.heading != name);
        self.append_section(name, content);
    }

    /// Drop every entry under `name`. Returns whether anything was removed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.heading != name);
        self.entries.len() != before
    }

    /// Discard every entry, keeping only the title.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the document into an exportable artifact.
    pub fn finalize(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Markdown => self.to_markdown().into_bytes(),
            ExportFormat::Json => self.to_json()?.into_bytes(),
        };

        tracing::debug!(entries = self.entries.len(), ?format, "Finalized document");

        Ok(ExportArtifact { bytes, filename: format.filename(), format })
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = format!("# {}\n", self.title);

        for entry in &self.entries {
            md.push_str(&format!("\n## {}\n\n", entry.heading));
            if !entry.body.is_empty() {
                md.push_str(entry.body.trim_end());
                md.push('\n');
            }
        }

        md
    }

    fn to_json(&self) -> Result<String, ExportError> {
        #[derive(Serialize)]
        struct JsonDocument<'a> {
            title: &'a str,
            generated_at: String,
            sections: &'a [SectionEntry],
        }

        let doc = JsonDocument {
            title: &self.title,
            generated_at: chrono::Utc::now().to_rfc3339(),
            sections: &self.entries,
        };

        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

impl Default for DocumentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// A serialized plan ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Serialized document
    pub bytes: Vec<u8>,

    /// Suggested filename
    pub filename: String,

    /// Format of `bytes`
    pub format: ExportFormat,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its suggested filename.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);

        std::fs::create_dir_all(dir)
            .and_then(|()| std::fs::write(&path, &self.bytes))
            .map_err(|source| ExportError::Write { path: path.clone(), source })?;

        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Wrote business plan");
        Ok(path)
    }
}
