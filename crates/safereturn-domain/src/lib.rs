//! Domain types shared across the SafeReturn workspace.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod case_number;
pub mod pagination;
pub mod status;
pub mod user;
