//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{SessionService, TransferService};
use crate::domain::repositories::AccountRepository;

/// Application-wide state.
///
/// Repositories are held as trait objects so the same router runs over
/// PostgreSQL in production and over the in-process store in tests.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub transfer_service: Arc<TransferService>,
    /// Direct store handle, used by the health probe.
    pub accounts: Arc<dyn AccountRepository>,
}
