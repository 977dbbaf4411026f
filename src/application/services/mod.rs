//! Business logic services for the application layer.

pub mod session_service;
pub mod token_codec;
pub mod transfer_service;

pub use session_service::{SessionService, hash_password};
pub use token_codec::TokenCodec;
pub use transfer_service::{TransferReceipt, TransferService};
