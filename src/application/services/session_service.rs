//! Session gate: credential authentication and token-based verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::application::services::token_codec::TokenCodec;
use crate::domain::entities::AccountPublic;
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw password with HMAC-SHA256 keyed by the server secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. An attacker with
/// read-only access to the account table cannot verify or forge credentials
/// without the server-side secret.
pub fn hash_password(secret: &str, raw: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(raw.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a raw password against a stored hash in constant time.
fn verify_password(secret: &str, raw: &str, stored_hash: &str) -> bool {
    let Ok(stored) = hex::decode(stored_hash) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(raw.as_bytes());
    mac.verify_slice(&stored).is_ok()
}

/// Authenticates callers and validates their session credentials.
///
/// Stateless: a successful login yields a signed token; later requests are
/// verified purely from that token's signature and expiry, then resolved
/// against the account store so callers always see current state.
pub struct SessionService {
    accounts: Arc<dyn AccountRepository>,
    codec: TokenCodec,
    secret: String,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// `secret` keys both the token signature and the password MAC; it must
    /// match the value used when accounts were created.
    pub fn new(accounts: Arc<dyn AccountRepository>, secret: String) -> Self {
        Self {
            accounts,
            codec: TokenCodec::new(secret.as_bytes().to_vec()),
            secret,
        }
    }

    /// Authenticates an email/password pair and mints a session token.
    ///
    /// The email lookup is case-insensitive. Unknown email and wrong
    /// password produce the same error, and the password comparison is
    /// constant-time, so neither response content nor timing reveals which
    /// half failed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] on authentication failure,
    /// [`AppError::Internal`] on store errors.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, AccountPublic), AppError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&self.secret, password, &account.password_hash) {
            tracing::info!(email, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.codec.issue(&account.email);
        tracing::info!(account_id = account.id, "login accepted");
        Ok((token, account.to_public()))
    }

    /// Validates a session token and resolves the caller's account.
    ///
    /// Resolution happens on every call: the returned projection reflects
    /// the account's current balance, not a snapshot taken at login.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if the token is invalid or its
    /// subject no longer resolves to an account.
    pub async fn verify(&self, token: &str) -> Result<AccountPublic, AppError> {
        let subject = self.codec.verify(token)?;

        let account = self
            .accounts
            .find_by_email(&subject)
            .await?
            .ok_or_else(|| AppError::unauthenticated("conta do token não existe"))?;

        Ok(account.to_public())
    }
}
