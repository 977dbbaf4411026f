//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /auth/login`   - open a session (public)
//! - `GET  /auth/verify`  - validate the session cookie (public)
//! - `POST /auth/logout`  - clear the session cookie (public)
//! - `GET  /health`       - health check (public)
//! - `/api/*`             - transaction endpoints (session required)
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Authentication** - session cookie / bearer token on `/api/*`

use crate::api;
use crate::api::handlers::{health_handler, login_handler, logout_handler, verify_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/verify", get(verify_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
