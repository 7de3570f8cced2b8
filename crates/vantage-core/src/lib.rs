//! Business logic for Vantage.
//!
//! This crate holds everything between the shared types and the adapters:
//! the fixed persona catalog, the in-memory session store, system prompt
//! assembly, best-effort numeric extraction from replies, and the
//! conversation orchestrator that ties them to a completion provider.
//!
//! Depends only on `vantage-types` and the `CompletionProvider` trait --
//! never on `vantage-infra`.

pub mod catalog;
pub mod extract;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod session;
