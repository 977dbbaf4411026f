//! Repository trait for account lookup.

use crate::domain::entities::Account;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only interface over the durable account store.
///
/// Deliberately exposes no balance writes: balances are mutated exclusively
/// inside the ledger's atomic transfer unit
/// ([`crate::domain::repositories::LedgerRepository::execute_transfer`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryBank`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Finds an account by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Returns whether an account with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
}
