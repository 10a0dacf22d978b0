//! Ride handlers: publish, cancel cascade, and read models.

mod cancel_ride;
mod publish_ride;
mod queries;

pub use cancel_ride::{CancelRideCommand, CancelRideHandler, CancelRideResult};
pub use publish_ride::{PublishRideCommand, PublishRideHandler, PublishRideResult};
pub use queries::{ListBookedRidesHandler, ListPublishedRidesHandler, SearchRidesHandler};
