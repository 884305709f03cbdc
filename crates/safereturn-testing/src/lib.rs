//! Test utilities for SafeReturn services.
//!
//! Provides [`auth::TestIdentity`] for minting signed access-token cookies.
//! Import in `#[cfg(test)]` blocks and `tests/` only — never in production code.

pub mod auth;
