//! VehicleRepository port - persistence for vehicles.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::vehicle::Vehicle;

/// Persistence for vehicles.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Inserts a vehicle; a duplicate registration number surfaces as
    /// `RegistrationTaken`.
    async fn insert(&self, vehicle: &Vehicle) -> Result<(), DomainError>;

    /// Lists the vehicles owned by a user, oldest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Vehicle>, DomainError>;

    /// Returns the owner's first registered vehicle, if any. Ride
    /// publishing uses this as the default vehicle.
    async fn first_by_owner(&self, owner_id: &UserId) -> Result<Option<Vehicle>, DomainError>;
}
