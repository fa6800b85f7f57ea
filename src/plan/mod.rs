//! Business plan generation workflow.
//!
//! The plan is produced one section at a time from a fixed template. A
//! [`SectionWorkflow`] owns the current position and the generated text for
//! each section, and forwards every successful generation to a
//! [`DocumentAccumulator`] that serializes the finished plan.
//!
//! ## Components
//!
//! - `BusinessProfile` - facts about the business that feed every prompt
//! - `SectionTemplate` - ordered, unique section names
//! - `SectionWorkflow` - start / next / previous / complete / reset
//! - `DocumentAccumulator` - heading + body entries and export

mod document;
mod error;
mod profile;
mod prompt;
mod template;
mod workflow;

pub use document::{
    DocumentAccumulator, ExportArtifact, ExportFormat, SectionEntry, DEFAULT_TITLE,
};
pub use error::{
    ExportError, GenerationFailure, PreconditionFailure, ProfileError, TemplateError,
};
pub use profile::BusinessProfile;
pub use prompt::{section_instruction, system_instruction};
pub use template::{SectionTemplate, DEFAULT_SECTIONS};
pub use workflow::{CommandOutcome, Phase, SectionWorkflow, DEFAULT_TIMEOUT};
