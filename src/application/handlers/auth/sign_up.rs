//! SignUpHandler - registers a user and sends the email verification code.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Gender, OneTimeCode, PhoneNumber, User};
use crate::ports::{Mailer, PasswordHasher, UserRepository};

use super::{generate_code, CODE_TTL_SECS};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    pub phone_number: Option<String>,
}

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignUpResult {
    pub user_id: UserId,
    pub email: String,
}

/// Handler for user registration.
pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
}

impl SignUpHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            hasher,
            mailer,
        }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpResult, DomainError> {
        if cmd.password.is_empty() {
            return Err(DomainError::validation(
                "password",
                "Password cannot be empty",
            ));
        }

        let phone = cmd
            .phone_number
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()?;

        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "An account with this email already exists",
            ));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;

        let mut user = User::register(
            UserId::new(),
            cmd.username,
            cmd.email,
            password_hash,
            cmd.gender,
            phone,
        )?;

        let code = OneTimeCode::new(generate_code(), Timestamp::now().plus_secs(CODE_TTL_SECS));
        let code_value = code.code().to_string();
        let expires_at = code.expires_at();
        user.issue_email_code(code);

        self.users.insert(&user).await?;

        // The account exists either way; a failed send is reported so the
        // caller knows to retry verification delivery.
        self.mailer
            .send_verification_code(user.email(), user.username(), &code_value, expires_at)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id(), "Verification email failed");
                DomainError::new(
                    ErrorCode::InternalError,
                    "User registered, but the verification email could not be sent",
                )
            })?;

        Ok(SignUpResult {
            user_id: *user.id(),
            email: user.email().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::PlainTextHasher;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::auth::tests::RecordingMailer;

    fn command(email: &str) -> SignUpCommand {
        SignUpCommand {
            username: "asha".to_string(),
            email: email.to_string(),
            password: "S3cret!pw".to_string(),
            gender: Gender::Female,
            phone_number: None,
        }
    }

    fn handler(
        users: Arc<InMemoryUserRepository>,
        mailer: Arc<RecordingMailer>,
    ) -> SignUpHandler {
        SignUpHandler::new(users, Arc::new(PlainTextHasher), mailer)
    }

    #[tokio::test]
    async fn signup_stores_user_with_pending_email_code() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());

        let result = handler(users.clone(), mailer.clone())
            .handle(command("asha@example.com"))
            .await
            .unwrap();

        let user = users.find_by_id(&result.user_id).await.unwrap().unwrap();
        assert!(!user.is_email_verified());
        assert!(user.email_code().is_some());

        // Mailer received the same code that is stored on the user.
        let sent = mailer.verification_codes();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, user.email_code().unwrap().code());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());
        let handler = handler(users, mailer);

        handler.handle(command("asha@example.com")).await.unwrap();
        let err = handler.handle(command("asha@example.com")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn signup_rejects_bad_phone() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());

        let mut cmd = command("asha@example.com");
        cmd.phone_number = Some("12345".to_string());

        let err = handler(users, mailer).handle(cmd).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
    }

    #[tokio::test]
    async fn signup_reports_mailer_failure_but_keeps_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::failing());

        let err = handler(users.clone(), mailer)
            .handle(command("asha@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(users
            .find_by_email("asha@example.com")
            .await
            .unwrap()
            .is_some());
    }
}
