//! PassengerDirectory port - identity snapshots for the booking core.
//!
//! The booking coordinator does not own user records; it consumes a
//! read-only identity lookup (verified id + gender + email) from the
//! identity collaborator through this port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::PassengerSnapshot;

/// Read-only lookup of passenger identity snapshots.
#[async_trait]
pub trait PassengerDirectory: Send + Sync {
    /// Fetches the snapshot for a user id, or `None` if unknown.
    async fn find_snapshot(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PassengerSnapshot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PassengerDirectory) {}
}
