//! # Web Library
//!
//! Service orchestration, HTTP handlers, middleware, and server setup for the
//! user management service.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{start_server, AppState, ServerConfig};

#[cfg(test)]
pub(crate) mod test_support;
