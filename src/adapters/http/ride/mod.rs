//! Ride HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::RideHandlers;
pub use routes::ride_routes;
