//! Session authentication middleware.
//!
//! Protected routes resolve the caller from the `authToken` cookie set at
//! login (or from an `Authorization: Bearer` header, matching the
//! `tipoToken` advertised by the login response). The verified account is
//! injected into the request as an extension, so handlers receive the
//! caller explicitly instead of reading ambient state.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::{domain::entities::AccountPublic, error::AppError, state::AppState};

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "authToken";

/// The authenticated caller, resolved once per request.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AccountPublic);

/// Extracts the session token from the `Cookie` header, falling back to a
/// `Bearer` Authorization header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
            })
        });
    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Authenticates a request and injects the caller as [`CurrentAccount`].
///
/// # Errors
///
/// Returns `401 Unauthorized` (`NAO_AUTENTICADO`) if the token is missing,
/// malformed, mis-issued, expired, or no longer resolves to an account.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_headers(req.headers())
        .ok_or_else(|| AppError::unauthenticated("token não encontrado"))?;

    let account = st.session_service.verify(&token).await?;
    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}
