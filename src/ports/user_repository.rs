//! UserRepository port - persistence for the User aggregate.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Persistence for users.
///
/// `insert` maps a duplicate email to `EmailTaken`; handlers also check
/// `find_by_email` first for the friendlier error path.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a newly registered user.
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Persists the full mutable state of an existing user (profile,
    /// verification flags, pending codes).
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Fetches a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Fetches a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
