//! Stateless session credential signing and verification.
//!
//! A credential is a compact two-part string,
//! `base64url(claims_json) . base64url(hmac_sha256(claims_json))`, signed
//! with a single symmetric secret. Validity is entirely determined by the
//! signature and the embedded expiry; nothing is stored server-side, so a
//! credential has exactly two states: valid until `exp`, expired forever
//! after. There is no revocation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Issuer constant embedded in every credential.
pub const ISSUER: &str = "bancoDigital";

/// Fixed credential lifetime: 2 hours.
pub const TOKEN_TTL_SECONDS: i64 = 7_200;

/// Lifetime in milliseconds, as reported in the login response.
pub const TOKEN_TTL_MILLIS: i64 = 7_200_000;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session credentials with a symmetric secret.
///
/// Stateless by design: two codecs constructed with the same secret accept
/// each other's tokens.
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mints a credential for `subject` expiring [`TOKEN_TTL_SECONDS`] from
    /// now.
    pub fn issue(&self, subject: &str) -> String {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> String {
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_TTL_SECONDS,
        };
        // Serializing a struct of strings and integers cannot fail.
        let payload = serde_json::to_vec(&claims).expect("claims serialize to JSON");
        let body = URL_SAFE_NO_PAD.encode(payload);
        let sig = URL_SAFE_NO_PAD.encode(self.mac(body.as_bytes()));
        format!("{body}.{sig}")
    }

    /// Verifies a credential and returns its subject.
    ///
    /// Checks, in order: signature, issuer, expiry. No grace period.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] on any failure; the reason is
    /// for logs and never distinguishes forgery from expiry on the wire.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let (body, sig) = token
            .split_once('.')
            .ok_or_else(|| AppError::unauthenticated("token malformado"))?;

        let sig = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| AppError::unauthenticated("token malformado"))?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(body.as_bytes());
        // Constant-time comparison.
        mac.verify_slice(&sig)
            .map_err(|_| AppError::unauthenticated("assinatura inválida"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| AppError::unauthenticated("token malformado"))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| AppError::unauthenticated("token malformado"))?;

        if claims.iss != ISSUER {
            return Err(AppError::unauthenticated("emissor desconhecido"));
        }
        if now.timestamp() >= claims.exp {
            return Err(AppError::unauthenticated("token expirado"));
        }

        Ok(claims.sub)
    }

    fn mac(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-signing-secret")
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let token = codec().issue("joao@email.com");
        assert_eq!(codec().verify(&token).unwrap(), "joao@email.com");
    }

    #[test]
    fn test_verify_is_idempotent() {
        let token = codec().issue("maria@email.com");
        let c = codec();
        assert_eq!(c.verify(&token).unwrap(), c.verify(&token).unwrap());
    }

    #[test]
    fn test_expiry_boundary() {
        let issued_at = Utc::now();
        let token = codec().issue_at("joao@email.com", issued_at);

        // One second before the deadline the token is still valid.
        let just_before = issued_at + Duration::seconds(TOKEN_TTL_SECONDS - 1);
        assert!(codec().verify_at(&token, just_before).is_ok());

        // At the deadline and after it, verification fails.
        let at_deadline = issued_at + Duration::seconds(TOKEN_TTL_SECONDS);
        assert!(codec().verify_at(&token, at_deadline).is_err());
        let after = issued_at + Duration::seconds(TOKEN_TTL_SECONDS + 1);
        assert!(codec().verify_at(&token, after).is_err());
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let token = codec().issue("joao@email.com");
        let (body, sig) = token.split_once('.').unwrap();

        let forged_claims = serde_json::json!({
            "iss": ISSUER,
            "sub": "atacante@email.com",
            "iat": 0,
            "exp": i64::MAX,
        });
        let forged_body = URL_SAFE_NO_PAD.encode(forged_claims.to_string());
        assert_ne!(forged_body, body);

        let forged = format!("{forged_body}.{sig}");
        assert!(codec().verify(&forged).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenCodec::new("secret-a").issue("joao@email.com");
        assert!(TokenCodec::new("secret-b").verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let c = codec();
        let claims = Claims {
            iss: "outroBanco".to_string(),
            sub: "joao@email.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECONDS,
        };
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let sig = URL_SAFE_NO_PAD.encode(c.mac(body.as_bytes()));
        assert!(c.verify(&format!("{body}.{sig}")).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        for garbage in ["", "abc", "a.b.c", "not-base64!.sig", "."] {
            assert!(codec().verify(garbage).is_err(), "{garbage:?}");
        }
    }
}
