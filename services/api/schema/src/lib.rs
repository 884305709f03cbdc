//! sea-orm entities for the SafeReturn database.

pub mod case_sequences;
pub mod cases;
pub mod sightings;
pub mod users;
