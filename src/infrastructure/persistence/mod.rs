//! Concrete repository implementations.
//!
//! - [`PgAccountRepository`] / [`PgLedgerRepository`] - PostgreSQL, used in
//!   production
//! - [`MemoryBank`] - in-process store used by the integration tests

pub mod memory;
pub mod pg_account_repository;
pub mod pg_ledger_repository;

pub use memory::MemoryBank;
pub use pg_account_repository::PgAccountRepository;
pub use pg_ledger_repository::PgLedgerRepository;
