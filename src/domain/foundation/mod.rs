//! Foundation types shared by every domain module.

mod auth;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode};
pub use events::{DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::{BookingId, RideId, UserId, VehicleId};
pub use timestamp::Timestamp;
