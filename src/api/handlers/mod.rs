//! HTTP request handlers for API endpoints.

pub mod auth;
pub mod health;
pub mod transfers;

pub use auth::{login_handler, logout_handler, verify_handler};
pub use health::health_handler;
pub use transfers::{history_handler, transfer_handler};
