//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - account lookup (read-only)
//! - [`LedgerRepository`] - atomic transfer commit and history queries

pub mod account_repository;
pub mod ledger_repository;

pub use account_repository::AccountRepository;
pub use ledger_repository::LedgerRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use ledger_repository::MockLedgerRepository;
