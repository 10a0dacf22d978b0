//! Mock auth adapters for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};
use crate::ports::{PasswordHasher, SessionValidator};

/// Session validator backed by a fixed token table.
#[derive(Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token as valid for the given user.
    pub fn with_user(self, token: &str, user: AuthenticatedUser) -> Self {
        self.tokens
            .write()
            .expect("MockSessionValidator: lock poisoned")
            .insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens
            .read()
            .expect("MockSessionValidator: lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Reversible "hasher" for tests: keeps the plaintext visible in the hash.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", plain))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", plain))
    }
}
