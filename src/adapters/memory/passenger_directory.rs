//! In-memory passenger directory for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::PassengerSnapshot;
use crate::ports::PassengerDirectory;

/// In-memory implementation of `PassengerDirectory`.
#[derive(Default)]
pub struct InMemoryPassengerDirectory {
    snapshots: RwLock<HashMap<UserId, PassengerSnapshot>>,
}

impl InMemoryPassengerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a snapshot.
    pub fn insert(&self, snapshot: PassengerSnapshot) {
        self.snapshots
            .write()
            .expect("InMemoryPassengerDirectory: lock poisoned")
            .insert(snapshot.id, snapshot);
    }
}

#[async_trait]
impl PassengerDirectory for InMemoryPassengerDirectory {
    async fn find_snapshot(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PassengerSnapshot>, DomainError> {
        Ok(self
            .snapshots
            .read()
            .expect("InMemoryPassengerDirectory: lock poisoned")
            .get(user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Gender;

    #[tokio::test]
    async fn returns_inserted_snapshot() {
        let directory = InMemoryPassengerDirectory::new();
        let snapshot = PassengerSnapshot {
            id: UserId::new(),
            display_name: "Asha".to_string(),
            gender: Gender::Female,
            email: "asha@example.com".to_string(),
        };
        directory.insert(snapshot.clone());

        let found = directory.find_snapshot(&snapshot.id).await.unwrap();
        assert_eq!(found, Some(snapshot));
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let directory = InMemoryPassengerDirectory::new();
        assert!(directory.find_snapshot(&UserId::new()).await.unwrap().is_none());
    }
}
