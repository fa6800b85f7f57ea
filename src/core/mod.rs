//! Core application services.
//!
//! Configuration loading and the environment overrides applied on top of it.

mod config;

pub use config::{
    AiConfig, Config, PlanConfig, UiConfig, API_KEY_ENV, LOCAL_CONFIG_FILE, MODEL_ENV,
    PROVIDER_ENV, SUGGESTED_MODELS,
};
