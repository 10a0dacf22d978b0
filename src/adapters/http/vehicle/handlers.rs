//! HTTP handlers for vehicle endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::vehicle::{
    DeleteVehicleCommand, DeleteVehicleHandler, ListVehiclesHandler, RegisterVehicleCommand,
    RegisterVehicleHandler,
};
use crate::domain::foundation::VehicleId;

use super::dto::{AddVehicleRequest, DeleteVehicleResponse, VehicleResponse};

/// Handler bundle for the vehicle router.
#[derive(Clone)]
pub struct VehicleHandlers {
    register: Arc<RegisterVehicleHandler>,
    list: Arc<ListVehiclesHandler>,
    delete: Arc<DeleteVehicleHandler>,
}

impl VehicleHandlers {
    pub fn new(
        register: Arc<RegisterVehicleHandler>,
        list: Arc<ListVehiclesHandler>,
        delete: Arc<DeleteVehicleHandler>,
    ) -> Self {
        Self {
            register,
            list,
            delete,
        }
    }
}

/// POST /api/vehicles/add
pub async fn add_vehicle(
    State(handlers): State<VehicleHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddVehicleRequest>,
) -> Response {
    let cmd = RegisterVehicleCommand {
        owner_id: user.id,
        model: req.model,
        registration_number: req.registration_number,
    };

    match handlers.register.handle(cmd).await {
        Ok(vehicle) => {
            (StatusCode::CREATED, Json(VehicleResponse::from(&vehicle))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/vehicles/my-vehicles
pub async fn my_vehicles(
    State(handlers): State<VehicleHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list.handle(user.id).await {
        Ok(vehicles) => {
            let body: Vec<VehicleResponse> = vehicles.iter().map(VehicleResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /api/vehicles/:id
pub async fn delete_vehicle(
    State(handlers): State<VehicleHandlers>,
    RequireAuth(user): RequireAuth,
    Path(vehicle_id): Path<Uuid>,
) -> Response {
    let cmd = DeleteVehicleCommand {
        vehicle_id: VehicleId::from_uuid(vehicle_id),
        owner_id: user.id,
    };

    match handlers.delete.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteVehicleResponse {
                message: "Vehicle deleted; its upcoming rides were cancelled".to_string(),
                rides_cancelled: result.rides_cancelled,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
