//! VerifyEmailHandler - confirms the email one-time code.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::UserRepository;

/// Command to verify an email address.
#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    pub email: String,
    pub code: String,
}

/// Handler for email verification.
pub struct VerifyEmailHandler {
    users: Arc<dyn UserRepository>,
}

impl VerifyEmailHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: VerifyEmailCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        user.confirm_email(&cmd.code, Timestamp::now())?;
        self.users.update(&user).await?;
        Ok(())
    }
}
