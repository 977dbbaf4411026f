//! Handlers for login, session verification, and logout.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse},
};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, LogoutResponse, VerifyResponse};
use crate::api::middleware::auth::{AUTH_COOKIE, token_from_headers};
use crate::application::services::token_codec::{TOKEN_TTL_MILLIS, TOKEN_TTL_SECONDS};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the session cookie string. `max_age = 0` clears it.
fn session_cookie(token: &str, max_age: i64) -> String {
    format!("{AUTH_COOKIE}={token}; HttpOnly; Secure; Path=/; Max-Age={max_age}; SameSite=Strict")
}

/// Authenticates a caller and opens a stateless session.
///
/// # Endpoint
///
/// `POST /auth/login` with body `{"email": ..., "senha": ...}`
///
/// On success returns `200` with the public account projection and sets the
/// `authToken` cookie (HttpOnly, Secure, SameSite=Strict, 2-hour lifetime).
///
/// # Errors
///
/// Returns `403` (`CREDENCIAIS_INVALIDAS`) for an unknown email or wrong
/// password, indistinguishably.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (token, account) = state
        .session_service
        .login(&payload.email, &payload.senha)
        .await?;

    let cookie = session_cookie(&token, TOKEN_TTL_SECONDS);
    let body = LoginResponse {
        tipo_token: "Bearer",
        expires_in: TOKEN_TTL_MILLIS,
        usuario: account.into(),
        message: "Login realizado com sucesso".to_string(),
    };

    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)))
}

/// Validates the session cookie and returns the caller's current account.
///
/// # Endpoint
///
/// `GET /auth/verify`
///
/// Returns `200 {authenticated: true, usuario: {...}}` for a valid token or
/// `401 {authenticated: false}` otherwise. The account projection is read
/// fresh on every call, so the balance is never a login-time snapshot.
pub async fn verify_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, (StatusCode, Json<VerifyResponse>)> {
    let unauthenticated = |message: &str| {
        (
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponse {
                authenticated: false,
                usuario: None,
                message: message.to_string(),
            }),
        )
    };

    let Some(token) = token_from_headers(&headers) else {
        return Err(unauthenticated("Token não encontrado"));
    };

    match state.session_service.verify(&token).await {
        Ok(account) => Ok(Json(VerifyResponse {
            authenticated: true,
            usuario: Some(account.into()),
            message: "Token válido".to_string(),
        })),
        Err(_) => Err(unauthenticated("Token inválido ou expirado")),
    }
}

/// Instructs the caller to discard its credential.
///
/// # Endpoint
///
/// `POST /auth/logout`
///
/// Overwrites the `authToken` cookie with `Max-Age=0`. Sessions are
/// stateless, so an already-issued token stays valid until its expiry; this
/// endpoint only removes it from the browser.
pub async fn logout_handler() -> impl IntoResponse {
    let body = LogoutResponse {
        success: true,
        message: "Logout realizado com sucesso".to_string(),
    };

    (
        AppendHeaders([(header::SET_COOKIE, session_cookie("", 0))]),
        Json(body),
    )
}
