//! Account entity: a bank customer with a balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A customer account row.
///
/// `balance` is a fixed-point decimal with 2-digit scale, never negative at
/// rest. Only the transfer engine mutates it; everything else reads.
/// `password_hash` is an opaque keyed hash, never surfaced to callers.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub password_hash: String,
    pub balance: Decimal,
    pub monthly_income: Decimal,
}

impl Account {
    /// Public projection of the account, safe to return to callers.
    pub fn to_public(&self) -> AccountPublic {
        AccountPublic {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            tax_id: self.tax_id.clone(),
            birth_date: self.birth_date,
            balance: self.balance,
            monthly_income: self.monthly_income,
        }
    }

    /// Identity-only projection used when the account appears as a
    /// transfer party.
    pub fn to_summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Everything a logged-in caller may see about an account.
///
/// Excludes the password hash by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountPublic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub balance: Decimal,
    pub monthly_income: Decimal,
}

/// Public identity fields of a transfer counterparty.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}
