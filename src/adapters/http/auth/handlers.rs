//! HTTP handlers for auth endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::error_response;
use crate::application::handlers::auth::{
    LogInCommand, LogInHandler, SignUpCommand, SignUpHandler, VerifyEmailCommand,
    VerifyEmailHandler,
};

use super::dto::{LogInRequest, MessageResponse, SignUpRequest, TokenResponse, VerifyEmailRequest};

/// Handler bundle for the auth router.
#[derive(Clone)]
pub struct AuthHandlers {
    sign_up: Arc<SignUpHandler>,
    verify_email: Arc<VerifyEmailHandler>,
    log_in: Arc<LogInHandler>,
}

impl AuthHandlers {
    pub fn new(
        sign_up: Arc<SignUpHandler>,
        verify_email: Arc<VerifyEmailHandler>,
        log_in: Arc<LogInHandler>,
    ) -> Self {
        Self {
            sign_up,
            verify_email,
            log_in,
        }
    }
}

/// POST /api/auth/signup
pub async fn sign_up(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignUpRequest>,
) -> Response {
    let cmd = SignUpCommand {
        username: req.username,
        email: req.email,
        password: req.password,
        gender: req.gender,
        phone_number: req.phone_number,
    };

    match handlers.sign_up.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(MessageResponse::new(format!(
                "A verification code has been sent to {}. Please check your inbox",
                result.email
            ))),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/verify-email
pub async fn verify_email(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<VerifyEmailRequest>,
) -> Response {
    let cmd = VerifyEmailCommand {
        email: req.email,
        code: req.code,
    };

    match handlers.verify_email.handle(cmd).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new(
                "Email verified successfully! You can now log in",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/login
pub async fn log_in(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LogInRequest>,
) -> Response {
    let cmd = LogInCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.log_in.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(TokenResponse {
                token: result.token,
                expires_in_secs: result.expires_in_secs,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
