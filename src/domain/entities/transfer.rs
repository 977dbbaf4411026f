//! Transfer entity and history records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::AccountSummary;

/// Maximum length of the free-text description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A committed transfer, as recorded in the ledger.
///
/// Immutable once committed. `id` and `occurred_at` are assigned by the
/// ledger at commit time, never by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub id: i64,
    pub occurred_at: DateTime<Utc>,
    pub amount: Decimal,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub description: Option<String>,
}

impl Transfer {
    /// Direction of this transfer from `account_id`'s point of view.
    pub fn direction_for(&self, account_id: i64) -> TransferDirection {
        if self.sender_id == account_id {
            TransferDirection::Sent
        } else {
            TransferDirection::Received
        }
    }

    /// Id of the other party from `account_id`'s point of view.
    pub fn counterparty_of(&self, account_id: i64) -> i64 {
        if self.sender_id == account_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// Whether the account viewing a history entry sent or received the money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Sent,
    Received,
}

/// A transfer annotated for one account's history view.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub transfer: Transfer,
    pub direction: TransferDirection,
    pub counterparty: AccountSummary,
}

/// One page of an account's history, newest first.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub entries: Vec<LedgerEntry>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Input for the atomic transfer unit. Validated by the engine before it
/// reaches the ledger; existence and sufficiency are re-checked inside the
/// atomic scope.
#[derive(Debug, Clone)]
pub struct NewTransfer {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
}
