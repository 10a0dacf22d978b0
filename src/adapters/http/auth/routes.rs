//! HTTP routes for auth endpoints.

use axum::{routing::post, Router};

use super::handlers::{log_in, sign_up, verify_email, AuthHandlers};

/// Creates the auth router. All endpoints are public.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/verify-email", post(verify_email))
        .route("/login", post(log_in))
        .with_state(handlers)
}
