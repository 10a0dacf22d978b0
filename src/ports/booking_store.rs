//! BookingStore port - the atomic unit over inventory and ledger.
//!
//! The coordinator never touches a connection pool or ambient storage
//! state: it asks the store for a unit of work scoped to one request,
//! performs inventory and ledger operations through it, and either commits
//! or lets the unit drop. Dropping an uncommitted unit rolls back - no
//! partial seat decrement or ledger write survives a failed validation or
//! a lower-level fault.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, VehicleId};

use super::{BookingLedger, RideInventory};

/// One atomic unit: inventory and ledger operations that commit or roll
/// back together, isolated from concurrent units touching the same rows.
///
/// The vehicle-deletion cascade also runs through this unit since it
/// mutates rides and bookings alongside the vehicle row.
#[async_trait]
pub trait BookingTx: RideInventory + BookingLedger + Send {
    /// Deletes a vehicle owned by `owner_id`. Returns whether a row was
    /// removed. Rides that reference the vehicle keep their history with
    /// the reference cleared.
    async fn delete_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        owner_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Commits the unit. Consumes the handle; every lock is released.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    /// Rolls the unit back explicitly. Dropping the handle has the same
    /// effect; this exists for call sites that want the error surfaced.
    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}

/// Factory for atomic units, injected into coordinators.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Opens a new atomic unit.
    async fn begin(&self) -> Result<Box<dyn BookingTx>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_store_object_safe(_: &dyn BookingStore) {}

    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn booking_store_is_send_sync() {
        assert_send_sync::<dyn BookingStore>();
    }
}
