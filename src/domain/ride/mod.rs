//! Ride domain: the unit of seat inventory.

mod ride;

pub use ride::{Ride, RideStatus};
