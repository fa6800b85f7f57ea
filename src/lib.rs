#![allow(clippy::manual_let_else)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]

//! # Planwright
//!
//! Guided business plan generator for your terminal.
//!
//! Planwright asks a few questions about your business, then writes a plan
//! one section at a time with a language model. You can step back and
//! forth between sections, regenerate any of them, and export the finished
//! plan as Markdown or JSON.
//!
//! ## Features
//!
//! - **Section workflow**: start, next, previous, complete, reset
//! - **Providers**: OpenAI-compatible chat completions and local Ollama models
//! - **Export**: Markdown document or JSON for further processing
//! - **TUI and batch**: interactive terminal UI or one-shot `generate`
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! planwright
//!
//! # Or generate everything non-interactively
//! planwright generate --profile business.toml
//! ```

pub mod ai;
pub mod app;
pub mod core;
pub mod plan;
pub mod tui;

pub use ai::{GenerationError, GenerationRequest, ProviderKind, TextGenerator};
pub use app::App;
pub use core::Config;
pub use plan::{
    BusinessProfile, CommandOutcome, DocumentAccumulator, ExportFormat, SectionTemplate,
    SectionWorkflow,
};

/// Version of the Planwright library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const APP_NAME: &str = "planwright";
