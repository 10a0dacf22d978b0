//! User aggregate entity.
//!
//! A user signs up with an email and password, proves ownership of the
//! email with a one-time code, and may later attach and verify a phone
//! number the same way. Verification codes are stored on the aggregate
//! with an expiry and compared in constant time.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};

use super::{Gender, PhoneNumber};

/// Maximum length for a username.
pub const MAX_USERNAME_LENGTH: usize = 100;

/// A pending one-time verification code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    code: String,
    expires_at: Timestamp,
}

impl OneTimeCode {
    /// Creates a code with the given expiry.
    pub fn new(code: String, expires_at: Timestamp) -> Self {
        Self { code, expires_at }
    }

    /// Returns the code value (for delivery to the user).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns when the code stops being accepted.
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Checks a submitted code against this challenge.
    ///
    /// The comparison is constant-time so response timing does not leak
    /// how many leading digits matched.
    pub fn matches(&self, submitted: &str, now: Timestamp) -> bool {
        if now.is_after(&self.expires_at) {
            return false;
        }
        if self.code.len() != submitted.len() {
            return false;
        }
        self.code.as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}

/// User aggregate.
///
/// # Invariants
///
/// - `email` is non-empty and contains '@'
/// - `username` is 1-100 characters
/// - a verified channel never has a pending code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    gender: Gender,
    phone: Option<PhoneNumber>,
    email_verified: bool,
    phone_verified: bool,
    email_code: Option<OneTimeCode>,
    phone_code: Option<OneTimeCode>,
    created_at: Timestamp,
}

impl User {
    /// Registers a new, unverified user.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if username or email is malformed
    pub fn register(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        gender: Gender,
        phone: Option<PhoneNumber>,
    ) -> Result<Self, DomainError> {
        Self::validate_username(&username)?;
        Self::validate_email(&email)?;

        Ok(Self {
            id,
            username,
            email,
            password_hash,
            gender,
            phone,
            email_verified: false,
            phone_verified: false,
            email_code: None,
            phone_code: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        gender: Gender,
        phone: Option<PhoneNumber>,
        email_verified: bool,
        phone_verified: bool,
        email_code: Option<OneTimeCode>,
        phone_code: Option<OneTimeCode>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            gender,
            phone,
            email_verified,
            phone_verified,
            email_code,
            phone_code,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn is_phone_verified(&self) -> bool {
        self.phone_verified
    }

    pub fn email_code(&self) -> Option<&OneTimeCode> {
        self.email_code.as_ref()
    }

    pub fn phone_code(&self) -> Option<&OneTimeCode> {
        self.phone_code.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Issues a fresh email verification code, replacing any pending one.
    pub fn issue_email_code(&mut self, code: OneTimeCode) {
        self.email_verified = false;
        self.email_code = Some(code);
    }

    /// Confirms the email channel with a submitted code.
    ///
    /// # Errors
    ///
    /// - `CodeRejected` if no code is pending, the code expired, or it
    ///   does not match
    pub fn confirm_email(&mut self, submitted: &str, now: Timestamp) -> Result<(), DomainError> {
        let accepted = self
            .email_code
            .as_ref()
            .map(|c| c.matches(submitted, now))
            .unwrap_or(false);

        if !accepted {
            return Err(DomainError::new(
                ErrorCode::CodeRejected,
                "Invalid or expired verification code",
            ));
        }

        self.email_verified = true;
        self.email_code = None;
        Ok(())
    }

    /// Attaches a phone number and issues a verification code for it.
    ///
    /// Any previous phone verification is invalidated.
    pub fn issue_phone_code(&mut self, phone: PhoneNumber, code: OneTimeCode) {
        self.phone = Some(phone);
        self.phone_verified = false;
        self.phone_code = Some(code);
    }

    /// Confirms the phone channel with a submitted code.
    ///
    /// # Errors
    ///
    /// - `CodeRejected` if no code is pending, the code expired, or it
    ///   does not match
    pub fn confirm_phone(&mut self, submitted: &str, now: Timestamp) -> Result<(), DomainError> {
        let accepted = self
            .phone_code
            .as_ref()
            .map(|c| c.matches(submitted, now))
            .unwrap_or(false);

        if !accepted {
            return Err(DomainError::new(
                ErrorCode::CodeRejected,
                "Invalid or expired verification code",
            ));
        }

        self.phone_verified = true;
        self.phone_code = None;
        Ok(())
    }

    /// Updates the editable profile fields.
    ///
    /// Changing the phone number resets its verification; keeping the same
    /// number leaves the verification intact.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new username is malformed
    pub fn update_profile(
        &mut self,
        username: String,
        phone: Option<PhoneNumber>,
        gender: Gender,
    ) -> Result<(), DomainError> {
        Self::validate_username(&username)?;

        if phone != self.phone {
            self.phone_verified = false;
            self.phone_code = None;
        }

        self.username = username;
        self.phone = phone;
        self.gender = gender;
        Ok(())
    }

    fn validate_username(username: &str) -> Result<(), DomainError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "username",
                "Username cannot be empty",
            ));
        }
        if trimmed.len() > MAX_USERNAME_LENGTH {
            return Err(DomainError::validation(
                "username",
                format!("Username must be {} characters or less", MAX_USERNAME_LENGTH),
            ));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email", "Invalid email address"));
        }
        Ok(())
    }
}
