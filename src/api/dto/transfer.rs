//! DTOs for the transfer endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::TransferReceipt;
use crate::domain::entities::{AccountSummary, HistoryPage, LedgerEntry, TransferDirection};

/// Body of `POST /api/transacoes/realizar`. The sender is resolved from the
/// session, never from the body.
#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    #[serde(rename = "idDestinatario")]
    pub id_destinatario: i64,

    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub valor: Decimal,

    #[serde(default)]
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub descricao: Option<String>,
}

/// Identity of one transfer party.
#[derive(Debug, Serialize)]
pub struct PartyDto {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

impl From<AccountSummary> for PartyDto {
    fn from(summary: AccountSummary) -> Self {
        Self {
            id: summary.id,
            nome: summary.name,
            email: summary.email,
        }
    }
}

/// A committed transfer with both parties resolved.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: i64,

    #[serde(rename = "dataTransacao")]
    pub data_transacao: DateTime<Utc>,

    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub valor: Decimal,

    pub descricao: Option<String>,
    pub remetente: PartyDto,
    pub destinatario: PartyDto,
}

impl From<TransferReceipt> for TransferResponse {
    fn from(receipt: TransferReceipt) -> Self {
        Self {
            id: receipt.transfer.id,
            data_transacao: receipt.transfer.occurred_at,
            valor: receipt.transfer.amount,
            descricao: receipt.transfer.description,
            remetente: receipt.sender.into(),
            destinatario: receipt.recipient.into(),
        }
    }
}

/// One history entry, tagged from the viewing account's perspective.
#[derive(Debug, Serialize)]
pub struct HistoryItemDto {
    pub id: i64,

    #[serde(rename = "dataTransacao")]
    pub data_transacao: DateTime<Utc>,

    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub valor: Decimal,

    pub descricao: Option<String>,

    #[serde(rename = "tipoTransacao")]
    pub tipo_transacao: &'static str,

    #[serde(rename = "outroUsuario")]
    pub outro_usuario: PartyDto,
}

impl From<LedgerEntry> for HistoryItemDto {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.transfer.id,
            data_transacao: entry.transfer.occurred_at,
            valor: entry.transfer.amount,
            descricao: entry.transfer.description,
            tipo_transacao: match entry.direction {
                TransferDirection::Sent => "ENVIADA",
                TransferDirection::Received => "RECEBIDA",
            },
            outro_usuario: entry.counterparty.into(),
        }
    }
}

/// One page of history, Spring-page-shaped for the existing frontend.
#[derive(Debug, Serialize)]
pub struct HistoryPageDto {
    pub content: Vec<HistoryItemDto>,

    #[serde(rename = "totalElements")]
    pub total_elements: i64,

    #[serde(rename = "totalPages")]
    pub total_pages: i64,

    pub number: i64,
    pub size: i64,
}

impl From<HistoryPage> for HistoryPageDto {
    fn from(page: HistoryPage) -> Self {
        Self {
            content: page.entries.into_iter().map(HistoryItemDto::from).collect(),
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            number: page.page,
            size: page.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_request_parses_wire_names() {
        let req: TransferRequest = serde_json::from_str(
            r#"{"idDestinatario": 2, "valor": 100.50, "descricao": "Pagamento de serviços"}"#,
        )
        .unwrap();

        assert_eq!(req.id_destinatario, 2);
        assert_eq!(req.valor, dec!(100.50));
        assert_eq!(req.descricao.as_deref(), Some("Pagamento de serviços"));
    }

    #[test]
    fn test_transfer_request_descricao_is_optional() {
        let req: TransferRequest =
            serde_json::from_str(r#"{"idDestinatario": 2, "valor": 1}"#).unwrap();
        assert!(req.descricao.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_transfer_request_rejects_long_descricao() {
        let req = TransferRequest {
            id_destinatario: 2,
            valor: dec!(1.00),
            descricao: Some("x".repeat(501)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_history_item_direction_tags() {
        use crate::domain::entities::Transfer;
        use chrono::Utc;

        let entry = LedgerEntry {
            transfer: Transfer {
                id: 3,
                occurred_at: Utc::now(),
                amount: dec!(75.00),
                sender_id: 1,
                recipient_id: 4,
                description: Some("Divisão da conta".to_string()),
            },
            direction: TransferDirection::Sent,
            counterparty: AccountSummary {
                id: 4,
                name: "Ana Costa".to_string(),
                email: "ana@email.com".to_string(),
            },
        };

        let value = serde_json::to_value(HistoryItemDto::from(entry)).unwrap();
        assert_eq!(value["tipoTransacao"], "ENVIADA");
        assert_eq!(value["outroUsuario"]["nome"], "Ana Costa");
        assert_eq!(value["valor"], 75.0);
    }
}
