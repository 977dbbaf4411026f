//! PostgreSQL implementation of the transfer ledger.
//!
//! The atomic unit is one database transaction: both account rows are locked
//! with `SELECT ... FOR UPDATE` in ascending-id order (two concurrent
//! transfers over the same pair in opposite directions always lock in the
//! same order, so they serialize instead of deadlocking), sufficiency is
//! decided on the balances read under those locks, and the two balance
//! updates plus the ledger insert commit together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccountSummary, LedgerEntry, NewTransfer, Transfer};
use crate::domain::repositories::LedgerRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TransferRow {
    id: i64,
    occurred_at: DateTime<Utc>,
    amount: Decimal,
    sender_id: i64,
    recipient_id: i64,
    description: Option<String>,
}

impl From<TransferRow> for Transfer {
    fn from(row: TransferRow) -> Self {
        Transfer {
            id: row.id,
            occurred_at: row.occurred_at,
            amount: row.amount,
            sender_id: row.sender_id,
            recipient_id: row.recipient_id,
            description: row.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    occurred_at: DateTime<Utc>,
    amount: Decimal,
    sender_id: i64,
    recipient_id: i64,
    description: Option<String>,
    sender_name: String,
    sender_email: String,
    recipient_name: String,
    recipient_email: String,
}

/// PostgreSQL repository for the append-only transfer ledger.
pub struct PgLedgerRepository {
    pool: Arc<PgPool>,
}

impl PgLedgerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps a commit-time failure, distinguishing conflicts the engine may
/// retry (serialization failure, deadlock) from genuine errors.
fn map_commit_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e
        && let Some(code) = db.code()
        && (code == "40001" || code == "40P01")
    {
        return AppError::TransferConflict;
    }
    e.into()
}

#[async_trait]
impl LedgerRepository for PgLedgerRepository {
    async fn execute_transfer(&self, new: NewTransfer) -> Result<Transfer, AppError> {
        let mut tx = self.pool.begin().await.map_err(map_commit_error)?;

        // Lock order: ascending account id.
        let (first_id, second_id) = if new.sender_id < new.recipient_id {
            (new.sender_id, new.recipient_id)
        } else {
            (new.recipient_id, new.sender_id)
        };

        let first_balance = sqlx::query_scalar::<_, Decimal>(
            "SELECT balance FROM accounts WHERE id = $1 FOR UPDATE",
        )
        .bind(first_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_commit_error)?
        .ok_or(AppError::AccountNotFound)?;

        let second_balance = sqlx::query_scalar::<_, Decimal>(
            "SELECT balance FROM accounts WHERE id = $1 FOR UPDATE",
        )
        .bind(second_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_commit_error)?
        .ok_or(AppError::AccountNotFound)?;

        let sender_balance = if new.sender_id == first_id {
            first_balance
        } else {
            second_balance
        };

        // Sufficiency is decided here, on the balance read under lock.
        if sender_balance < new.amount {
            return Err(AppError::InsufficientFunds);
        }

        sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
            .bind(new.amount)
            .bind(new.sender_id)
            .execute(&mut *tx)
            .await
            .map_err(map_commit_error)?;

        sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
            .bind(new.amount)
            .bind(new.recipient_id)
            .execute(&mut *tx)
            .await
            .map_err(map_commit_error)?;

        let row = sqlx::query_as::<_, TransferRow>(
            r#"
            INSERT INTO transfers (sender_id, recipient_id, amount, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, occurred_at, amount, sender_id, recipient_id, description
            "#,
        )
        .bind(new.sender_id)
        .bind(new.recipient_id)
        .bind(new.amount)
        .bind(&new.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_commit_error)?;

        tx.commit().await.map_err(map_commit_error)?;

        Ok(row.into())
    }

    async fn history_page(
        &self,
        account_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LedgerEntry>, AppError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT t.id, t.occurred_at, t.amount, t.sender_id, t.recipient_id, t.description,
                   s.name AS sender_name, s.email AS sender_email,
                   r.name AS recipient_name, r.email AS recipient_email
            FROM transfers t
            JOIN accounts s ON s.id = t.sender_id
            JOIN accounts r ON r.id = t.recipient_id
            WHERE t.sender_id = $1 OR t.recipient_id = $1
            ORDER BY t.occurred_at DESC, t.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let counterparty = if row.sender_id == account_id {
                    AccountSummary {
                        id: row.recipient_id,
                        name: row.recipient_name.clone(),
                        email: row.recipient_email.clone(),
                    }
                } else {
                    AccountSummary {
                        id: row.sender_id,
                        name: row.sender_name.clone(),
                        email: row.sender_email.clone(),
                    }
                };
                let transfer = Transfer {
                    id: row.id,
                    occurred_at: row.occurred_at,
                    amount: row.amount,
                    sender_id: row.sender_id,
                    recipient_id: row.recipient_id,
                    description: row.description,
                };
                let direction = transfer.direction_for(account_id);
                LedgerEntry {
                    transfer,
                    direction,
                    counterparty,
                }
            })
            .collect())
    }

    async fn count_for_account(&self, account_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM transfers WHERE sender_id = $1 OR recipient_id = $1",
        )
        .bind(account_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
