//! HTTP routes for vehicle endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{add_vehicle, delete_vehicle, my_vehicles, VehicleHandlers};

/// Creates the vehicle router. All endpoints require authentication.
pub fn vehicle_routes(handlers: VehicleHandlers) -> Router {
    Router::new()
        .route("/add", post(add_vehicle))
        .route("/my-vehicles", get(my_vehicles))
        .route("/:id", delete(delete_vehicle))
        .with_state(handlers)
}
