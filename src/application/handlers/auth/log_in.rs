//! LogInHandler - credential check and token issuance.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

/// Command to log in.
#[derive(Debug, Clone)]
pub struct LogInCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LogInResult {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Handler for login.
pub struct LogInHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LogInHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LogInCommand) -> Result<LogInResult, DomainError> {
        // Unknown email and wrong password collapse into the same error.
        let invalid =
            || DomainError::new(ErrorCode::InvalidCredentials, "Invalid credentials");

        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(invalid)?;

        if !user.is_email_verified() {
            return Err(DomainError::new(
                ErrorCode::EmailNotVerified,
                "Your email is not verified. Please check your inbox for the code",
            ));
        }

        if !self.hasher.verify(&cmd.password, user.password_hash())? {
            return Err(invalid());
        }

        let issued = self
            .tokens
            .issue(user.id())
            .await
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        Ok(LogInResult {
            token: issued.token,
            expires_in_secs: issued.expires_in_secs,
        })
    }
}
