//! Error taxonomy for the plan workflow.
//!
//! Generation failures are absorbed into workflow state, precondition failures
//! turn commands into no-ops, and export failures are reported to the caller
//! of `finalize` without touching the workflow.

use std::path::PathBuf;

use crate::ai::GenerationError;

/// A command was issued in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionFailure {
    #[error("no business profile has been captured")]
    MissingProfile,

    #[error("the workflow has already started (step {step})")]
    AlreadyStarted { step: isize },

    #[error("the workflow has not started yet")]
    NotStarted,

    #[error("already at the first section")]
    AtFirstSection,

    #[error("already at the last section; use complete instead")]
    AtLastSection,

    #[error("the current section is not the last one (step {step} of {last})")]
    NotAtLastSection { step: isize, last: usize },

    #[error("the workflow is already complete")]
    AlreadyComplete,

    #[error("the business profile cannot be changed once generation has started")]
    ProfileLocked,
}

/// Generation for a section failed; the workflow still advanced.
#[derive(Debug, thiserror::Error)]
#[error("failed to generate '{section}': {source}")]
pub struct GenerationFailure {
    /// Section whose content could not be generated
    pub section: String,

    /// Underlying provider error
    #[source]
    pub source: GenerationError,
}

/// The finished document could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot export before the workflow is complete")]
    NotComplete,

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A section template is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("a section template needs at least one section")]
    Empty,

    #[error("section {index} has a blank name")]
    BlankName { index: usize },

    #[error("duplicate section name: {0}")]
    Duplicate(String),
}

/// A business profile is incomplete or could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("business profile field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
