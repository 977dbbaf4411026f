mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;
use serde_json::json;

use banco_digital::infrastructure::persistence::MemoryBank;

#[tokio::test]
async fn test_login_success_sets_cookie_and_returns_account() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana Souza", "ana@email.com", "segredo123", dec!(1500.00));
    let server = common::test_server(bank);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "ana@email.com", "senha": "segredo123"}))
        .await;

    response.assert_status_ok();

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("missing session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("authToken="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=7200"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["tipoToken"], "Bearer");
    assert_eq!(body["expiresIn"], 7_200_000);
    assert_eq!(body["message"], "Login realizado com sucesso");
    assert_eq!(body["usuario"]["email"], "ana@email.com");
    assert_eq!(body["usuario"]["saldo"], 1500.0);
    // The stored hash never leaves the server.
    assert!(body["usuario"].get("senha").is_none());
    assert!(body["usuario"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_forbidden() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(100.00));
    let server = common::test_server(bank);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "ana@email.com", "senha": "errada"}))
        .await;

    response.assert_status_forbidden();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["codigo"], "CREDENCIAIS_INVALIDAS");
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(100.00));
    let server = common::test_server(bank);

    let wrong_password = server
        .post("/auth/login")
        .json(&json!({"email": "ana@email.com", "senha": "errada"}))
        .await;
    let unknown_email = server
        .post("/auth/login")
        .json(&json!({"email": "ninguem@email.com", "senha": "errada"}))
        .await;

    assert_eq!(wrong_password.status_code(), unknown_email.status_code());
    assert_eq!(
        wrong_password.json::<serde_json::Value>()["codigo"],
        unknown_email.json::<serde_json::Value>()["codigo"]
    );
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(100.00));
    let server = common::test_server(bank);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "ANA@EMAIL.COM", "senha": "segredo123"}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_login_rejects_malformed_payload() {
    let bank = Arc::new(MemoryBank::new());
    let server = common::test_server(bank);

    let response = server
        .post("/auth/login")
        .json(&json!({"email": "not-an-email", "senha": "x"}))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["codigo"], "DADOS_INVALIDOS");
}

#[tokio::test]
async fn test_verify_with_valid_cookie() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(42.50));
    let server = common::test_server(bank);

    let token = common::login(&server, "ana@email.com", "segredo123").await;

    let response = server
        .get("/auth/verify")
        .add_header("Cookie", common::session_cookie(&token))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["usuario"]["email"], "ana@email.com");
    assert_eq!(body["usuario"]["saldo"], 42.5);
}

#[tokio::test]
async fn test_verify_accepts_bearer_header() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(10.00));
    let server = common::test_server(bank);

    let token = common::login(&server, "ana@email.com", "segredo123").await;

    let response = server
        .get("/auth/verify")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_verify_without_token_is_unauthorized() {
    let bank = Arc::new(MemoryBank::new());
    let server = common::test_server(bank);

    let response = server.get("/auth/verify").await;

    response.assert_status_unauthorized();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["authenticated"], false);
    assert!(body["usuario"].is_null() || body.get("usuario").is_none());
}

#[tokio::test]
async fn test_verify_rejects_tampered_token() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(10.00));
    let server = common::test_server(bank);

    let token = common::login(&server, "ana@email.com", "segredo123").await;
    let tampered = format!("{token}x");

    let response = server
        .get("/auth/verify")
        .add_header("Cookie", common::session_cookie(&tampered))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_verify_reflects_balance_changes_after_login() {
    let bank = Arc::new(MemoryBank::new());
    let ana = common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(100.00));
    let bia = common::seed_account(&bank, "Bia", "bia@email.com", "outrasenha", dec!(0.00));
    let server = common::test_server(bank.clone());

    let token = common::login(&server, "ana@email.com", "segredo123").await;

    // The balance moves behind the session's back.
    let state = common::create_test_state(bank);
    state
        .transfer_service
        .transfer(ana, bia, dec!(40.00), None)
        .await
        .unwrap();

    let response = server
        .get("/auth/verify")
        .add_header("Cookie", common::session_cookie(&token))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["usuario"]["saldo"], 60.0);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let bank = Arc::new(MemoryBank::new());
    let server = common::test_server(bank);

    let response = server.post("/auth/logout").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logout realizado com sucesso");

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("logout must overwrite the cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("authToken=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_token_stays_valid_after_logout() {
    let bank = Arc::new(MemoryBank::new());
    common::seed_account(&bank, "Ana", "ana@email.com", "segredo123", dec!(10.00));
    let server = common::test_server(bank);

    let token = common::login(&server, "ana@email.com", "segredo123").await;
    server.post("/auth/logout").await.assert_status_ok();

    // Sessions are stateless: logout only clears the browser cookie.
    let response = server
        .get("/auth/verify")
        .add_header("Cookie", common::session_cookie(&token))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_health_endpoint() {
    let bank = Arc::new(MemoryBank::new());
    let server = common::test_server(bank);

    let response = server.get("/health").await;

    response.assert_status_ok();
}
