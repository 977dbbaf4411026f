//! In-process implementation of both repository traits.
//!
//! Backs the integration test suite and local runs without a database. One
//! mutex guards the whole bank state, so every `execute_transfer` call is
//! trivially atomic: balances are read, re-validated, written, and the
//! ledger row appended while the lock is held. Commits are serialized, so
//! `TransferConflict` never arises here.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{Account, AccountSummary, LedgerEntry, NewTransfer, Transfer};
use crate::domain::repositories::{AccountRepository, LedgerRepository};
use crate::error::AppError;

#[derive(Default)]
struct BankState {
    accounts: HashMap<i64, Account>,
    // Append-only, in commit order.
    transfers: Vec<Transfer>,
    next_account_id: i64,
    next_transfer_id: i64,
}

/// In-memory account store and ledger.
#[derive(Default)]
pub struct MemoryBank {
    state: Mutex<BankState>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account with the given attributes and returns its id.
    pub fn seed_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        balance: Decimal,
    ) -> i64 {
        let mut state = self.state.lock().expect("bank state lock poisoned");
        state.next_account_id += 1;
        let id = state.next_account_id;
        state.accounts.insert(
            id,
            Account {
                id,
                name: name.to_string(),
                email: email.to_string(),
                tax_id: format!("tax-{id}"),
                birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
                password_hash: password_hash.to_string(),
                balance,
                monthly_income: Decimal::ZERO,
            },
        );
        id
    }

    /// Sum of all balances; the conservation invariant says this is
    /// unchanged by any successful transfer.
    pub fn total_balance(&self) -> Decimal {
        let state = self.state.lock().expect("bank state lock poisoned");
        state.accounts.values().map(|a| a.balance).sum()
    }

    /// Number of committed ledger rows.
    pub fn ledger_len(&self) -> usize {
        let state = self.state.lock().expect("bank state lock poisoned");
        state.transfers.len()
    }

    /// Current balance of an account, if it exists.
    pub fn balance_of(&self, id: i64) -> Option<Decimal> {
        let state = self.state.lock().expect("bank state lock poisoned");
        state.accounts.get(&id).map(|a| a.balance)
    }
}

#[async_trait]
impl AccountRepository for MemoryBank {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let state = self.state.lock().expect("bank state lock poisoned");
        Ok(state.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let state = self.state.lock().expect("bank state lock poisoned");
        Ok(state
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let state = self.state.lock().expect("bank state lock poisoned");
        Ok(state.accounts.contains_key(&id))
    }
}

#[async_trait]
impl LedgerRepository for MemoryBank {
    async fn execute_transfer(&self, new: NewTransfer) -> Result<Transfer, AppError> {
        let mut state = self.state.lock().expect("bank state lock poisoned");

        if !state.accounts.contains_key(&new.sender_id)
            || !state.accounts.contains_key(&new.recipient_id)
        {
            return Err(AppError::AccountNotFound);
        }

        let sender_balance = state.accounts[&new.sender_id].balance;
        if sender_balance < new.amount {
            return Err(AppError::InsufficientFunds);
        }

        state.next_transfer_id += 1;
        let transfer = Transfer {
            id: state.next_transfer_id,
            occurred_at: Utc::now(),
            amount: new.amount,
            sender_id: new.sender_id,
            recipient_id: new.recipient_id,
            description: new.description,
        };

        if let Some(sender) = state.accounts.get_mut(&new.sender_id) {
            sender.balance -= new.amount;
        }
        if let Some(recipient) = state.accounts.get_mut(&new.recipient_id) {
            recipient.balance += new.amount;
        }
        state.transfers.push(transfer.clone());

        Ok(transfer)
    }

    async fn history_page(
        &self,
        account_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, AppError> {
        let state = self.state.lock().expect("bank state lock poisoned");
        Ok(state
            .transfers
            .iter()
            .rev()
            .filter(|t| t.sender_id == account_id || t.recipient_id == account_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|t| {
                let counterparty_id = t.counterparty_of(account_id);
                let counterparty = state
                    .accounts
                    .get(&counterparty_id)
                    .map(Account::to_summary)
                    .unwrap_or(AccountSummary {
                        id: counterparty_id,
                        name: String::new(),
                        email: String::new(),
                    });
                LedgerEntry {
                    transfer: t.clone(),
                    direction: t.direction_for(account_id),
                    counterparty,
                }
            })
            .collect())
    }

    async fn count_for_account(&self, account_id: i64) -> Result<i64, AppError> {
        let state = self.state.lock().expect("bank state lock poisoned");
        Ok(state
            .transfers
            .iter()
            .filter(|t| t.sender_id == account_id || t.recipient_id == account_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TransferDirection;
    use rust_decimal_macros::dec;

    fn bank_with_two() -> (MemoryBank, i64, i64) {
        let bank = MemoryBank::new();
        let a = bank.seed_account("Ana", "ana@email.com", "h", dec!(100.00));
        let b = bank.seed_account("Bia", "bia@email.com", "h", dec!(100.00));
        (bank, a, b)
    }

    fn new_transfer(sender: i64, recipient: i64, amount: Decimal) -> NewTransfer {
        NewTransfer {
            sender_id: sender,
            recipient_id: recipient,
            amount,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_transfer_moves_money_and_appends() {
        let (bank, a, b) = bank_with_two();

        let t = bank
            .execute_transfer(new_transfer(a, b, dec!(20.00)))
            .await
            .unwrap();

        assert_eq!(t.id, 1);
        assert_eq!(bank.balance_of(a), Some(dec!(80.00)));
        assert_eq!(bank.balance_of(b), Some(dec!(120.00)));
        assert_eq!(bank.ledger_len(), 1);
    }

    #[tokio::test]
    async fn test_conservation_across_transfers() {
        let (bank, a, b) = bank_with_two();
        let c = bank.seed_account("Carla", "carla@email.com", "h", dec!(50.00));
        let before = bank.total_balance();

        for (s, r, amount) in [
            (a, b, dec!(10.00)),
            (b, c, dec!(35.50)),
            (c, a, dec!(0.01)),
            (b, a, dec!(99.99)),
        ] {
            bank.execute_transfer(new_transfer(s, r, amount)).await.unwrap();
        }

        assert_eq!(bank.total_balance(), before);
    }

    #[tokio::test]
    async fn test_insufficient_funds_leaves_state_unchanged() {
        let bank = MemoryBank::new();
        let a = bank.seed_account("Ana", "ana@email.com", "h", dec!(10.00));
        let b = bank.seed_account("Bia", "bia@email.com", "h", dec!(0.00));

        let result = bank.execute_transfer(new_transfer(a, b, dec!(10.01))).await;

        assert!(matches!(result, Err(AppError::InsufficientFunds)));
        assert_eq!(bank.balance_of(a), Some(dec!(10.00)));
        assert_eq!(bank.balance_of(b), Some(dec!(0.00)));
        assert_eq!(bank.ledger_len(), 0);
    }

    #[tokio::test]
    async fn test_exact_balance_is_sufficient() {
        let (bank, a, b) = bank_with_two();
        bank.execute_transfer(new_transfer(a, b, dec!(100.00)))
            .await
            .unwrap();
        assert_eq!(bank.balance_of(a), Some(dec!(0.00)));
    }

    #[tokio::test]
    async fn test_missing_account_is_rejected() {
        let (bank, a, _) = bank_with_two();
        let result = bank.execute_transfer(new_transfer(a, 999, dec!(1.00))).await;
        assert!(matches!(result, Err(AppError::AccountNotFound)));
        assert_eq!(bank.ledger_len(), 0);
    }

    #[tokio::test]
    async fn test_history_newest_first_with_direction_tags() {
        let (bank, a, b) = bank_with_two();
        let c = bank.seed_account("Carla", "carla@email.com", "h", dec!(50.00));

        bank.execute_transfer(new_transfer(a, b, dec!(20.00))).await.unwrap();
        bank.execute_transfer(new_transfer(c, a, dec!(5.00))).await.unwrap();

        let page = bank.history_page(a, 0, 10).await.unwrap();
        assert_eq!(page.len(), 2);

        // Newest first: the C→A transfer comes before the A→B one.
        assert_eq!(page[0].direction, TransferDirection::Received);
        assert_eq!(page[0].counterparty.name, "Carla");
        assert_eq!(page[1].direction, TransferDirection::Sent);
        assert_eq!(page[1].counterparty.name, "Bia");

        assert_eq!(bank.count_for_account(a).await.unwrap(), 2);
        assert_eq!(bank.count_for_account(b).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_history_pagination_window() {
        let (bank, a, b) = bank_with_two();
        for _ in 0..5 {
            bank.execute_transfer(new_transfer(a, b, dec!(1.00))).await.unwrap();
        }

        let first = bank.history_page(a, 0, 2).await.unwrap();
        let second = bank.history_page(a, 2, 2).await.unwrap();
        let last = bank.history_page(a, 4, 2).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(last.len(), 1);
        // Ids descend across the pages: commit order, newest first.
        assert_eq!(first[0].transfer.id, 5);
        assert_eq!(last[0].transfer.id, 1);
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let (bank, a, _) = bank_with_two();
        let found = bank.find_by_email("ANA@EMAIL.COM").await.unwrap();
        assert_eq!(found.map(|acc| acc.id), Some(a));
    }
}
