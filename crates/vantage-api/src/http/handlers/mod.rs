//! HTTP request handlers grouped by resource.

pub mod chat;
pub mod persona;
pub mod session;
