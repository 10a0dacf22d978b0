//! Session validation and token issuance ports.
//!
//! Provider-agnostic: the HTTP middleware validates Bearer tokens through
//! `SessionValidator` and the login handler issues them through
//! `TokenIssuer`, without either knowing the token format.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};

/// Validates access tokens and extracts the caller identity.
///
/// # Contract
///
/// - Return `AuthError::InvalidToken` for malformed or bad-signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient faults
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a token (without "Bearer " prefix) and returns the caller.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Issues access tokens for verified users.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issues a token identifying `user_id`.
    async fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError>;
}
