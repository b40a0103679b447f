//! # simrs-advisory
//!
//! AI advisory client for the SIMRS dashboard.
//!
//! - `config`: credential from the environment, settings from optional TOML
//! - `prompt`: prompt text and the Gemini wire types
//! - `gemini`: `GeminiClient`, the HTTP implementation of `AdvisoryService`
//! - `advisor`: `Advisor`, which replaces every failure with a fixed message
//!
//! No retry, streaming, or caching is performed.

pub mod advisor;
pub mod config;
pub mod gemini;
pub mod prompt;

pub use advisor::Advisor;
pub use config::AdvisoryConfig;
pub use gemini::GeminiClient;
