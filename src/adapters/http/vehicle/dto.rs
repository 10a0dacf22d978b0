//! HTTP DTOs for vehicle endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::vehicle::Vehicle;

/// Request to register a vehicle.
#[derive(Debug, Clone, Deserialize)]
pub struct AddVehicleRequest {
    pub model: String,
    pub registration_number: String,
}

/// A registered vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleResponse {
    pub vehicle_id: String,
    pub model: String,
    pub registration_number: String,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id().to_string(),
            model: vehicle.model().to_string(),
            registration_number: vehicle.registration_number().to_string(),
        }
    }
}

/// Response for a vehicle deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteVehicleResponse {
    pub message: String,
    pub rides_cancelled: usize,
}
