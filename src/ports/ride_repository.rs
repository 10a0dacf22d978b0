//! RideRepository port - persistence for the Ride aggregate.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ride::Ride;

/// Persistence for rides outside the booking unit of work.
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Inserts a newly published ride.
    async fn insert(&self, ride: &Ride) -> Result<(), DomainError>;

    /// Checks whether the driver already has a scheduled ride departing
    /// within `buffer_hours` of `departure_time`.
    async fn has_overlapping_scheduled(
        &self,
        driver_id: &UserId,
        departure_time: Timestamp,
        buffer_hours: i64,
    ) -> Result<bool, DomainError>;
}
