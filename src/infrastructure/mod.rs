//! Infrastructure layer: database-backed and in-process persistence.

pub mod persistence;
