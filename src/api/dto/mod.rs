//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Wire field names follow the original Portuguese
//! contract consumed by the frontend.

pub mod auth;
pub mod health;
pub mod pagination;
pub mod transfer;
