//! DTOs for the authentication endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::AccountPublic;

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    pub senha: String,
}

/// Public projection of an account on the wire.
#[derive(Debug, Serialize)]
pub struct UsuarioDto {
    pub id: i64,
    pub nome: String,
    pub email: String,

    #[serde(rename = "rendaMensal", with = "rust_decimal::serde::float")]
    pub renda_mensal: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub saldo: Decimal,

    #[serde(rename = "dataNascimento")]
    pub data_nascimento: NaiveDate,

    #[serde(rename = "idFiscal")]
    pub id_fiscal: String,
}

impl From<AccountPublic> for UsuarioDto {
    fn from(account: AccountPublic) -> Self {
        Self {
            id: account.id,
            nome: account.name,
            email: account.email,
            renda_mensal: account.monthly_income,
            saldo: account.balance,
            data_nascimento: account.birth_date,
            id_fiscal: account.tax_id,
        }
    }
}

/// Successful login response. The token itself travels in the `authToken`
/// cookie, not in the body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "tipoToken")]
    pub tipo_token: &'static str,

    #[serde(rename = "expiresIn")]
    pub expires_in: i64,

    pub usuario: UsuarioDto,
    pub message: String,
}

/// Response of `GET /auth/verify`, for both outcomes.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub authenticated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<UsuarioDto>,

    pub message: String,
}

/// Response of `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_usuario_dto_wire_names() {
        let dto = UsuarioDto {
            id: 1,
            nome: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            renda_mensal: dec!(5000.00),
            saldo: dec!(123.45),
            data_nascimento: NaiveDate::from_ymd_opt(1985, 1, 30).unwrap(),
            id_fiscal: "111.222.333-44".to_string(),
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "nome": "João Silva",
                "email": "joao@email.com",
                "rendaMensal": 5000.0,
                "saldo": 123.45,
                "dataNascimento": "1985-01-30",
                "idFiscal": "111.222.333-44",
            })
        );
    }

    #[test]
    fn test_login_request_rejects_bad_email() {
        let req = LoginRequest {
            email: "não-é-email".to_string(),
            senha: "x".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_verify_response_omits_absent_usuario() {
        let resp = VerifyResponse {
            authenticated: false,
            usuario: None,
            message: "Token não encontrado".to_string(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert!(value.get("usuario").is_none());
    }
}
