pub mod auth;
pub mod case;
pub mod sighting;
pub mod user;
