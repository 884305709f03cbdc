//! Auth types shared across SafeReturn crates.
//!
//! Provides JWT validation, cookie builders, and the [`identity::Identity`]
//! extractor that authenticates requests from the access-token cookie.

pub mod cookie;
pub mod identity;
pub mod token;
