//! Read-only passenger identity snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::Gender;

/// The slice of a user's identity the booking core needs: who they are,
/// their gender (for eligibility rules), and where to reach them.
///
/// Sourced from the identity collaborator; never mutated by the booking
/// subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerSnapshot {
    pub id: UserId,
    pub display_name: String,
    pub gender: Gender,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_gender_lowercase() {
        let snapshot = PassengerSnapshot {
            id: UserId::new(),
            display_name: "Asha".to_string(),
            gender: Gender::Female,
            email: "asha@example.com".to_string(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["gender"], "female");
    }
}
