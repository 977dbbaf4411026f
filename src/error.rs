//! Application error taxonomy and HTTP mapping.
//!
//! Every failure surfaced to a caller carries a stable machine-readable
//! `codigo` plus a human-readable `mensagem`, matching the wire contract of
//! the transaction endpoints. Database and other unexpected failures are
//! logged in full and collapsed into `ERRO_INTERNO` so internals never leak.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every error response: `{codigo, mensagem}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub codigo: &'static str,
    pub mensagem: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    /// Missing, malformed, mis-issued, or expired session token.
    #[error("Não autenticado: {reason}")]
    Unauthenticated { reason: String },

    #[error("Conta não encontrada")]
    AccountNotFound,

    #[error("Não é possível fazer transferência para si mesmo")]
    SelfTransfer,

    #[error("Valor inválido: {reason}")]
    InvalidAmount { reason: String },

    #[error("Saldo insuficiente para realizar a transferência")]
    InsufficientFunds,

    /// Atomic commit rejected after exhausting retries. Safe to retry from
    /// the caller side after checking the history for the outcome.
    #[error("Conflito de concorrência ao efetivar a transferência")]
    TransferConflict,

    #[error("Parâmetros de paginação inválidos: {reason}")]
    InvalidPageParameters { reason: String },

    /// Request body failed structural validation.
    #[error("Dados inválidos fornecidos: {reason}")]
    Validation { reason: String },

    #[error("Erro interno do servidor")]
    Internal,
}

impl AppError {
    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }

    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    pub fn invalid_page(reason: impl Into<String>) -> Self {
        Self::InvalidPageParameters {
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code carried in the response body.
    pub fn codigo(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "CREDENCIAIS_INVALIDAS",
            Self::Unauthenticated { .. } => "NAO_AUTENTICADO",
            Self::AccountNotFound => "CONTA_NAO_ENCONTRADA",
            Self::SelfTransfer => "TRANSFERENCIA_PARA_SI_MESMO",
            Self::InvalidAmount { .. } => "VALOR_INVALIDO",
            Self::InsufficientFunds => "SALDO_INSUFICIENTE",
            Self::TransferConflict => "CONFLITO_TRANSACAO",
            Self::InvalidPageParameters { .. } => "PAGINACAO_INVALIDA",
            Self::Validation { .. } => "DADOS_INVALIDOS",
            Self::Internal => "ERRO_INTERNO",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::FORBIDDEN,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::AccountNotFound
            | Self::SelfTransfer
            | Self::InvalidAmount { .. }
            | Self::InsufficientFunds
            | Self::InvalidPageParameters { .. }
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::TransferConflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            codigo: self.codigo(),
            mensagem: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        Self::Internal
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let reason = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation { reason }
    }
}
