//! DTO modules that bridge services with templates and APIs.

pub mod api;
pub mod birthdays;
pub mod communications;
pub mod people;
