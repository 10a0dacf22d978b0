//! Booking ledger entry.
//!
//! A booking is the ledger row for one (ride, passenger) pair. Cancelling
//! never deletes the row; the status flips to `Cancelled` and a later
//! re-booking reactivates the same row. Exactly one row per pair ever
//! exists, which lets a unique constraint enforce "no duplicate active
//! booking" without extra locking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, RideId, Timestamp, UserId};

/// Every booking in this system reserves exactly one seat.
pub const SEATS_PER_BOOKING: u32 = 1;

/// Booking status: a two-state cycle after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid booking status: {}", s),
            )),
        }
    }
}

/// Booking ledger entry for one (ride, passenger) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    ride_id: RideId,
    passenger_id: UserId,
    seats_booked: u32,
    status: BookingStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Booking {
    /// Creates a new confirmed booking for one seat.
    pub fn confirm(id: BookingId, ride_id: RideId, passenger_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            ride_id,
            passenger_id,
            seats_booked: SEATS_PER_BOOKING,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a booking from persistence (no validation).
    pub fn reconstitute(
        id: BookingId,
        ride_id: RideId,
        passenger_id: UserId,
        seats_booked: u32,
        status: BookingStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            ride_id,
            passenger_id,
            seats_booked,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn ride_id(&self) -> &RideId {
        &self.ride_id
    }

    pub fn passenger_id(&self) -> &UserId {
        &self.passenger_id
    }

    pub fn seats_booked(&self) -> u32 {
        self.seats_booked
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Cancels a confirmed booking.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the booking is already cancelled: to the caller a
    ///   cancelled booking is indistinguishable from a missing one
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::Confirmed {
            return Err(DomainError::not_found("Booking"));
        }
        self.status = BookingStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reactivates a cancelled booking instead of inserting a duplicate.
    ///
    /// # Errors
    ///
    /// - `AlreadyBooked` if the booking is already confirmed
    pub fn reactivate(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::AlreadyBooked,
                "You have already booked this ride",
            ));
        }
        self.status = BookingStatus::Confirmed;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
