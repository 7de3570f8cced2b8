//! Shared domain types for Vantage.
//!
//! This crate contains the core domain types used across the Vantage
//! workspace: personas, chat sessions, completion wire types, chart/table
//! payloads, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod insight;
pub mod llm;
pub mod persona;
