//! Bcrypt implementation of the PasswordHasher port.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Bcrypt password hasher.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the library's default cost.
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Creates a hasher with an explicit cost (lower in tests).
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hashing failed: {}", e)))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(plain, hash).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Verification failed: {}", e))
        })
    }
}
