//! Core business entities.

pub mod account;
pub mod transfer;

pub use account::{Account, AccountPublic, AccountSummary};
pub use transfer::{
    HistoryPage, LedgerEntry, MAX_DESCRIPTION_LEN, NewTransfer, Transfer, TransferDirection,
};
