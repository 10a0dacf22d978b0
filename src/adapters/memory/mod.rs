//! In-memory adapters: deterministic test doubles for the storage ports.

mod booking_store;
mod passenger_directory;
mod repositories;

pub use booking_store::InMemoryBookingStore;
pub use passenger_directory::InMemoryPassengerDirectory;
pub use repositories::{InMemoryRideRepository, InMemoryUserRepository, InMemoryVehicleRepository};
