//! API route configuration.
//!
//! All routes here require a valid session; the caller is resolved by
//! [`crate::api::middleware::auth`] before any handler runs.

use crate::api::handlers::{history_handler, transfer_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Transaction routes, protected by session authentication.
///
/// # Endpoints
///
/// - `POST /transacoes/realizar`  - execute a transfer from the caller
/// - `GET  /transacoes/historico` - paginated history for the caller
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/transacoes/realizar", post(transfer_handler))
        .route("/transacoes/historico", get(history_handler))
}
