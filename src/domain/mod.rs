//! Domain types and rules of the Birthy admin front-end.

pub mod auth;
pub mod birthday;
pub mod communication;
pub mod person;
pub mod types;
