//! Phone verification handlers.
//!
//! SMS delivery is simulated: the code is written to the log, matching the
//! behavior of the original deployment. The rest of the flow (storage,
//! expiry, constant-time comparison) is real.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{OneTimeCode, PhoneNumber};
use crate::ports::UserRepository;

use super::{generate_code, CODE_TTL_SECS};

/// Command to attach a phone number and send its verification code.
#[derive(Debug, Clone)]
pub struct SendPhoneCodeCommand {
    pub user_id: UserId,
    pub phone_number: String,
}

/// Handler that issues phone verification codes.
pub struct SendPhoneCodeHandler {
    users: Arc<dyn UserRepository>,
}

impl SendPhoneCodeHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SendPhoneCodeCommand) -> Result<(), DomainError> {
        let phone = PhoneNumber::parse(&cmd.phone_number)?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let code = OneTimeCode::new(generate_code(), Timestamp::now().plus_secs(CODE_TTL_SECS));
        tracing::info!(
            user_id = %user.id(),
            phone = %phone,
            code = %code.code(),
            "Simulating SMS delivery of phone verification code"
        );
        user.issue_phone_code(phone, code);

        self.users.update(&user).await?;
        Ok(())
    }
}

/// Command to confirm a phone verification code.
#[derive(Debug, Clone)]
pub struct VerifyPhoneCodeCommand {
    pub user_id: UserId,
    pub code: String,
}

/// Handler that confirms phone verification codes.
pub struct VerifyPhoneCodeHandler {
    users: Arc<dyn UserRepository>,
}

impl VerifyPhoneCodeHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: VerifyPhoneCodeCommand) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        user.confirm_phone(&cmd.code, Timestamp::now())?;
        self.users.update(&user).await?;
        Ok(())
    }
}
