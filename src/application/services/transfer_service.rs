//! Transfer engine: validation, atomic execution with bounded retry, and
//! history queries.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::domain::entities::{
    AccountSummary, HistoryPage, MAX_DESCRIPTION_LEN, NewTransfer, Transfer,
};
use crate::domain::repositories::{AccountRepository, LedgerRepository};
use crate::error::AppError;

/// Largest accepted page size for history queries.
const MAX_PAGE_SIZE: i64 = 100;

/// Delay between atomic-commit retries.
const RETRY_INTERVAL_MS: u64 = 25;

/// A committed transfer joined with both parties' public identity.
///
/// The party data is a read-only join for response purposes, not a ledger
/// field.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub transfer: Transfer,
    pub sender: AccountSummary,
    pub recipient: AccountSummary,
}

/// The only component that moves money between accounts.
///
/// Input validation happens here; existence and sufficiency are decided
/// inside the ledger's atomic unit, on the balances read under lock. The
/// engine never pre-reads balances, so there is no check-then-act window.
pub struct TransferService {
    accounts: Arc<dyn AccountRepository>,
    ledger: Arc<dyn LedgerRepository>,
    max_commit_retries: usize,
}

impl TransferService {
    /// Creates a new transfer engine.
    ///
    /// `max_commit_retries` bounds how many times a conflicted atomic commit
    /// is re-attempted after the first try.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        ledger: Arc<dyn LedgerRepository>,
        max_commit_retries: usize,
    ) -> Self {
        Self {
            accounts,
            ledger,
            max_commit_retries,
        }
    }

    /// Moves `amount` from `sender_id` to `recipient_id` as one atomic unit.
    ///
    /// On a rejected commit ([`AppError::TransferConflict`]) the whole
    /// validate-and-apply unit is retried up to the configured bound; any
    /// other failure is surfaced immediately. The engine never retries once
    /// a commit may have succeeded.
    ///
    /// # Errors
    ///
    /// - [`AppError::SelfTransfer`] if sender and recipient are the same
    /// - [`AppError::InvalidAmount`] if the amount is not positive or has
    ///   more than 2 fractional digits
    /// - [`AppError::Validation`] if the description exceeds 500 characters
    /// - [`AppError::AccountNotFound`] if either account is missing
    /// - [`AppError::InsufficientFunds`] if the sender's balance at commit
    ///   time is below the amount
    /// - [`AppError::TransferConflict`] after exhausting commit retries
    pub async fn transfer(
        &self,
        sender_id: i64,
        recipient_id: i64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<TransferReceipt, AppError> {
        if sender_id == recipient_id {
            return Err(AppError::SelfTransfer);
        }
        if amount <= Decimal::ZERO {
            return Err(AppError::invalid_amount("o valor deve ser positivo"));
        }
        if amount.normalize().scale() > 2 {
            return Err(AppError::invalid_amount(
                "o valor deve ter no máximo 2 casas decimais",
            ));
        }
        if let Some(desc) = &description
            && desc.chars().count() > MAX_DESCRIPTION_LEN
        {
            return Err(AppError::validation(format!(
                "descrição excede {MAX_DESCRIPTION_LEN} caracteres"
            )));
        }

        let new = NewTransfer {
            sender_id,
            recipient_id,
            amount,
            description,
        };

        let strategy = FixedInterval::from_millis(RETRY_INTERVAL_MS).take(self.max_commit_retries);
        let transfer = RetryIf::spawn(
            strategy,
            || self.ledger.execute_transfer(new.clone()),
            |e: &AppError| {
                let conflicted = matches!(e, AppError::TransferConflict);
                if conflicted {
                    tracing::warn!(sender_id, recipient_id, "atomic commit rejected, retrying");
                }
                conflicted
            },
        )
        .await?;

        tracing::info!(
            transfer_id = transfer.id,
            sender_id,
            recipient_id,
            amount = %amount,
            "transfer committed"
        );

        // Read-only join of both parties for the response.
        let sender = self
            .accounts
            .find_by_id(sender_id)
            .await?
            .ok_or(AppError::AccountNotFound)?
            .to_summary();
        let recipient = self
            .accounts
            .find_by_id(recipient_id)
            .await?
            .ok_or(AppError::AccountNotFound)?
            .to_summary();

        Ok(TransferReceipt {
            transfer,
            sender,
            recipient,
        })
    }

    /// One page of the account's history, newest first (0-indexed pages).
    ///
    /// Read-only; safe to call concurrently with transfers. The returned
    /// order is the ledger's commit order.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidPageParameters`] for a negative page, a
    ///   non-positive size, or a size above 100
    /// - [`AppError::AccountNotFound`] if the account does not exist
    pub async fn history(
        &self,
        account_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<HistoryPage, AppError> {
        if page < 0 {
            return Err(AppError::invalid_page("page deve ser maior ou igual a 0"));
        }
        if page_size <= 0 {
            return Err(AppError::invalid_page("size deve ser maior que 0"));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(AppError::invalid_page(format!(
                "size deve ser no máximo {MAX_PAGE_SIZE}"
            )));
        }

        if !self.accounts.exists(account_id).await? {
            return Err(AppError::AccountNotFound);
        }

        let entries = self
            .ledger
            .history_page(account_id, page * page_size, page_size)
            .await?;
        let total_elements = self.ledger.count_for_account(account_id).await?;
        let total_pages = (total_elements + page_size - 1) / page_size;

        Ok(HistoryPage {
            entries,
            total_elements,
            total_pages,
            page,
            page_size,
        })
    }
}
