//! Vehicle HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::VehicleHandlers;
pub use routes::vehicle_routes;
