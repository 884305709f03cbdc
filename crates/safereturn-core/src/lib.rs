//! Shared service plumbing for the SafeReturn workspace.
//!
//! Config loading, health endpoints, request-id middleware, serialization
//! helpers, and tracing initialization.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
