//! Handlers for the transfer endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::pagination::HistoryParams;
use crate::api::dto::transfer::{HistoryPageDto, TransferRequest, TransferResponse};
use crate::api::middleware::auth::CurrentAccount;
use crate::error::AppError;
use crate::state::AppState;

/// Executes a transfer from the authenticated caller to another account.
///
/// # Endpoint
///
/// `POST /api/transacoes/realizar`
///
/// # Request Body
///
/// ```json
/// {
///   "idDestinatario": 2,
///   "valor": 100.50,
///   "descricao": "Pagamento de serviços"
/// }
/// ```
///
/// # Errors
///
/// Returns `400` with a stable `{codigo, mensagem}` body on business-rule
/// failure (self transfer, invalid amount, unknown recipient, insufficient
/// funds), `409` when the atomic commit lost to concurrent transfers after
/// all retries, and `500` on unexpected failure.
pub async fn transfer_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentAccount>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    payload.validate()?;

    let receipt = state
        .transfer_service
        .transfer(
            caller.0.id,
            payload.id_destinatario,
            payload.valor,
            payload.descricao,
        )
        .await?;

    Ok(Json(receipt.into()))
}

/// Returns the caller's paginated transfer history, newest first.
///
/// # Endpoint
///
/// `GET /api/transacoes/historico?page=0&size=10`
///
/// Each entry is tagged `ENVIADA` or `RECEBIDA` from the caller's
/// perspective and carries the counterparty's public identity.
///
/// # Errors
///
/// Returns `400` (`PAGINACAO_INVALIDA`) for out-of-range page parameters.
pub async fn history_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentAccount>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryPageDto>, AppError> {
    let (page, size) = params.page_and_size();

    let history = state.transfer_service.history(caller.0.id, page, size).await?;

    Ok(Json(history.into()))
}
