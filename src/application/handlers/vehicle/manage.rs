//! Vehicle registration, listing, and deletion.
//!
//! Deletion is the interesting one: the vehicle's future scheduled rides
//! and their bookings are cancelled in the same atomic unit that removes
//! the vehicle, so a crash can never leave orphaned rides pointing at a
//! deleted vehicle.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::ports::{BookingLedger, BookingStore, BookingTx, RideInventory, VehicleRepository};

/// Command to register a vehicle.
#[derive(Debug, Clone)]
pub struct RegisterVehicleCommand {
    pub owner_id: UserId,
    pub model: String,
    pub registration_number: String,
}

/// Handler for registering vehicles.
pub struct RegisterVehicleHandler {
    vehicles: Arc<dyn VehicleRepository>,
}

impl RegisterVehicleHandler {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { vehicles }
    }

    pub async fn handle(&self, cmd: RegisterVehicleCommand) -> Result<Vehicle, DomainError> {
        let vehicle = Vehicle::register(
            VehicleId::new(),
            cmd.owner_id,
            cmd.model,
            &cmd.registration_number,
        )?;
        self.vehicles.insert(&vehicle).await?;
        Ok(vehicle)
    }
}

/// Handler for listing the caller's vehicles.
pub struct ListVehiclesHandler {
    vehicles: Arc<dyn VehicleRepository>,
}

impl ListVehiclesHandler {
    pub fn new(vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { vehicles }
    }

    pub async fn handle(&self, owner_id: UserId) -> Result<Vec<Vehicle>, DomainError> {
        self.vehicles.list_by_owner(&owner_id).await
    }
}

/// Command to delete a vehicle.
#[derive(Debug, Clone)]
pub struct DeleteVehicleCommand {
    pub vehicle_id: VehicleId,
    pub owner_id: UserId,
}

/// Result of a vehicle deletion.
#[derive(Debug, Clone)]
pub struct DeleteVehicleResult {
    pub rides_cancelled: usize,
}

/// Handler for the vehicle-deletion cascade.
pub struct DeleteVehicleHandler {
    store: Arc<dyn BookingStore>,
}

impl DeleteVehicleHandler {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: DeleteVehicleCommand,
    ) -> Result<DeleteVehicleResult, DomainError> {
        let mut tx = self.store.begin().await?;

        let cancelled = tx
            .cancel_scheduled_rides_for_vehicle(&cmd.vehicle_id, Timestamp::now())
            .await?;
        for ride_id in &cancelled {
            tx.cancel_bookings_for_ride(ride_id).await?;
        }

        if !tx.delete_vehicle(&cmd.vehicle_id, &cmd.owner_id).await? {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                "Vehicle not found or you do not have permission to delete it",
            ));
        }

        tx.commit().await?;

        Ok(DeleteVehicleResult {
            rides_cancelled: cancelled.len(),
        })
    }
}
