//! Repository trait for the append-only transfer ledger.

use crate::domain::entities::{LedgerEntry, NewTransfer, Transfer};
use crate::error::AppError;
use async_trait::async_trait;

/// Interface over the durable ledger and the atomic transfer commit.
///
/// `execute_transfer` is the single place balances are written. The store
/// must apply the two balance updates and the ledger append as one unit:
/// either all three commit or none do, and the sufficiency check happens on
/// the balances read inside that same unit.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLedgerRepository`] - PostgreSQL,
///   row locks taken in ascending account-id order
/// - [`crate::infrastructure::persistence::MemoryBank`] - in-process store,
///   whole unit behind one mutex
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Runs one attempt of the atomic transfer unit.
    ///
    /// Locks both account rows, re-reads balances, re-validates sufficiency,
    /// applies both balance writes, and appends the ledger row with a
    /// store-assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// - [`AppError::AccountNotFound`] if either account is missing inside
    ///   the atomic scope
    /// - [`AppError::InsufficientFunds`] if the sender's balance at commit
    ///   time is below the amount
    /// - [`AppError::TransferConflict`] if the store rejected the commit due
    ///   to concurrent modification; the engine decides whether to retry
    /// - [`AppError::Internal`] on other database errors
    async fn execute_transfer(&self, new: NewTransfer) -> Result<Transfer, AppError>;

    /// One page of transfers where the account is sender or recipient,
    /// newest first (commit order), each joined with the counterparty's
    /// public identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn history_page(
        &self,
        account_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, AppError>;

    /// Total number of ledger entries involving the account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_account(&self, account_id: i64) -> Result<i64, AppError>;
}
