//! PasswordHasher port - credential hashing seam.
//!
//! Synchronous on purpose: hashing is CPU-bound, and call sites that care
//! can wrap it in a blocking task.

use crate::domain::foundation::DomainError;

/// Hashes and verifies passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Verifies a plaintext password against a stored hash.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PasswordHasher) {}
}
