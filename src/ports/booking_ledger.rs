//! BookingLedger port - booking-row operations inside an atomic unit.

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, DomainError, RideId, UserId};
use crate::domain::booking::Booking;

/// Ledger side of the booking unit of work.
///
/// # Contract
///
/// - At most one booking row exists per (ride, passenger) pair, ever;
///   `find_booking` therefore returns at most one result.
/// - `insert_booking` surfaces a unique-constraint violation as
///   `StorageConflict`. The coordinator checks `find_booking` first, so
///   hitting the constraint means two units raced, and the caller may
///   retry.
#[async_trait]
pub trait BookingLedger {
    /// Looks up the booking row for a (ride, passenger) pair.
    async fn find_booking(
        &mut self,
        ride_id: &RideId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError>;

    /// Inserts a new confirmed booking row.
    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError>;

    /// Flips a cancelled booking back to confirmed.
    async fn reactivate_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError>;

    /// Flips a confirmed booking to cancelled.
    async fn cancel_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError>;

    /// Locks and reads a booking only if it is confirmed and owned by
    /// `passenger_id`. `None` covers absent, cancelled, and not-yours
    /// alike, so ownership mismatches do not leak existence.
    async fn lock_confirmed_booking(
        &mut self,
        booking_id: &BookingId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError>;

    /// Flips every booking on `ride_id` to cancelled and returns how many
    /// rows changed (ride-cancellation cascade).
    async fn cancel_bookings_for_ride(&mut self, ride_id: &RideId) -> Result<u64, DomainError>;
}
