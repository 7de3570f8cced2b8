//! Infrastructure layer for Vantage.
//!
//! Concrete implementations behind the abstractions `vantage-core` consumes:
//! the OpenAI-compatible completion provider over HTTP, config file loading,
//! and credential resolution from the environment.

pub mod config;
pub mod llm;
pub mod secret;
