//! REST API layer: router, handlers, response envelope, and error mapping.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
