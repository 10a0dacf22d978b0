//! HTTP DTOs for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::Gender;

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    pub phone_number: Option<String>,
}

/// Request to verify an email with a one-time code.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a fresh access token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Generic acknowledgment.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
