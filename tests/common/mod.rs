#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use rust_decimal::Decimal;
use serde_json::json;

use banco_digital::application::services::{SessionService, TransferService, hash_password};
use banco_digital::infrastructure::persistence::MemoryBank;
use banco_digital::routes::app_router;
use banco_digital::state::AppState;

/// Signing secret shared by every test session.
pub const TEST_SECRET: &str = "test-signing-secret";

/// Seeds an account whose password hash matches `password` under the test
/// secret, so the account can log in over HTTP.
pub fn seed_account(
    bank: &MemoryBank,
    name: &str,
    email: &str,
    password: &str,
    balance: Decimal,
) -> i64 {
    bank.seed_account(name, email, &hash_password(TEST_SECRET, password), balance)
}

/// Builds the application state over the in-process store.
pub fn create_test_state(bank: Arc<MemoryBank>) -> AppState {
    let session_service = Arc::new(SessionService::new(bank.clone(), TEST_SECRET.to_string()));
    let transfer_service = Arc::new(TransferService::new(bank.clone(), bank.clone(), 3));

    AppState {
        session_service,
        transfer_service,
        accounts: bank,
    }
}

/// Spins up the full router, with auth middleware, over the given store.
pub fn test_server(bank: Arc<MemoryBank>) -> TestServer {
    TestServer::new(app_router(create_test_state(bank))).unwrap()
}

/// Logs in over HTTP and returns the raw session token from the cookie.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({"email": email, "senha": password}))
        .await;

    response.assert_status_ok();

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();

    token_from_set_cookie(&set_cookie)
}

/// Extracts the token value from a `Set-Cookie` header line.
pub fn token_from_set_cookie(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("authToken="))
        .expect("cookie must be named authToken")
        .to_string()
}

/// Formats the request `Cookie` header carrying the session token.
pub fn session_cookie(token: &str) -> String {
    format!("authToken={token}")
}
