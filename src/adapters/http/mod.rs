//! HTTP adapters - REST API surface.
//!
//! Each domain module has its own DTO/handler/route triple; `app`
//! assembles them under `/api` with the auth middleware and tracing/CORS
//! layers applied to the whole router.

pub mod auth;
pub mod booking;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod ride;
pub mod vehicle;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use auth::{auth_routes, AuthHandlers};
pub use booking::{booking_routes, BookingHandlers};
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use profile::{profile_routes, ProfileHandlers};
pub use ride::{ride_routes, RideHandlers};
pub use vehicle::{vehicle_routes, VehicleHandlers};

/// Everything the router needs, already wired.
pub struct AppRouters {
    pub auth: AuthHandlers,
    pub profile: ProfileHandlers,
    pub vehicles: VehicleHandlers,
    pub rides: RideHandlers,
    pub bookings: BookingHandlers,
    pub validator: AuthState,
}

/// Builds the full application router.
pub fn app(routers: AppRouters) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth_routes(routers.auth))
        .nest("/api/user", profile_routes(routers.profile))
        .nest("/api/vehicles", vehicle_routes(routers.vehicles))
        .nest("/api/rides", ride_routes(routers.rides))
        .nest("/api/bookings", booking_routes(routers.bookings))
        .layer(from_fn_with_state(routers.validator, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "Welcome to the RideShare API Server!"
}
