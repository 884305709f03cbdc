mod helpers;

mod auth_test;
mod identity_test;
mod sighting_test;
