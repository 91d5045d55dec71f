//! Domain models and request/response types

pub mod custom_field;
pub mod location;
pub mod role;
pub mod staff;
pub mod user;
pub mod visitor;
