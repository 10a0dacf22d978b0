//! Ride aggregate entity.
//!
//! A ride is the unit of seat inventory: a driver offers `total_seats`
//! seats between an origin and a destination at a departure time, and the
//! `available_seats` counter tracks what is still open.
//!
//! # Invariants
//!
//! - `0 <= available_seats <= total_seats`
//! - for every committed transaction, `available_seats` plus the seats of
//!   confirmed bookings equals `total_seats`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, RideId, Timestamp, UserId, VehicleId};
use crate::domain::user::{Gender, PassengerSnapshot};

/// Ride lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Scheduled,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Scheduled => "scheduled",
            RideStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(RideStatus::Scheduled),
            "cancelled" => Ok(RideStatus::Cancelled),
            _ => Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid ride status: {}", s),
            )),
        }
    }
}

/// Ride aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    id: RideId,
    driver_id: UserId,
    vehicle_id: Option<VehicleId>,
    origin: String,
    destination: String,
    departure_time: Timestamp,
    total_seats: u32,
    available_seats: u32,
    price_per_seat: i64,
    female_only: bool,
    status: RideStatus,
    created_at: Timestamp,
}

impl Ride {
    /// Publishes a new ride with all seats available.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if origin/destination is empty, seats is zero,
    ///   or the price is negative
    #[allow(clippy::too_many_arguments)]
    pub fn publish(
        id: RideId,
        driver_id: UserId,
        vehicle_id: VehicleId,
        origin: String,
        destination: String,
        departure_time: Timestamp,
        total_seats: u32,
        price_per_seat: i64,
        female_only: bool,
    ) -> Result<Self, DomainError> {
        if origin.trim().is_empty() {
            return Err(DomainError::validation("origin", "Origin cannot be empty"));
        }
        if destination.trim().is_empty() {
            return Err(DomainError::validation(
                "destination",
                "Destination cannot be empty",
            ));
        }
        if total_seats == 0 {
            return Err(DomainError::validation(
                "available_seats",
                "A ride must offer at least one seat",
            ));
        }
        if price_per_seat < 0 {
            return Err(DomainError::validation(
                "price_per_seat",
                "Price cannot be negative",
            ));
        }

        Ok(Self {
            id,
            driver_id,
            vehicle_id: Some(vehicle_id),
            origin,
            destination,
            departure_time,
            total_seats,
            available_seats: total_seats,
            price_per_seat,
            female_only,
            status: RideStatus::Scheduled,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a ride from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RideId,
        driver_id: UserId,
        vehicle_id: Option<VehicleId>,
        origin: String,
        destination: String,
        departure_time: Timestamp,
        total_seats: u32,
        available_seats: u32,
        price_per_seat: i64,
        female_only: bool,
        status: RideStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            driver_id,
            vehicle_id,
            origin,
            destination,
            departure_time,
            total_seats,
            available_seats,
            price_per_seat,
            female_only,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &RideId {
        &self.id
    }

    pub fn driver_id(&self) -> &UserId {
        &self.driver_id
    }

    pub fn vehicle_id(&self) -> Option<&VehicleId> {
        self.vehicle_id.as_ref()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn departure_time(&self) -> Timestamp {
        self.departure_time
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    pub fn price_per_seat(&self) -> i64 {
        self.price_per_seat
    }

    pub fn is_female_only(&self) -> bool {
        self.female_only
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Validates that `passenger` may reserve a seat right now.
    ///
    /// Checks short-circuit in a fixed order; the first violated rule is
    /// the one reported.
    ///
    /// # Errors
    ///
    /// - `SelfBookingDenied` - the passenger is the driver
    /// - `RideNotScheduled` - the ride has been cancelled
    /// - `RideFull` - no seats left
    /// - `EligibilityDenied` - female-only ride, passenger is not female
    pub fn ensure_reservable_by(&self, passenger: &PassengerSnapshot) -> Result<(), DomainError> {
        if self.driver_id == passenger.id {
            return Err(DomainError::new(
                ErrorCode::SelfBookingDenied,
                "You cannot book your own ride",
            ));
        }
        if self.status != RideStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::RideNotScheduled,
                "This ride is no longer scheduled",
            ));
        }
        if self.available_seats < 1 {
            return Err(DomainError::new(
                ErrorCode::RideFull,
                "This ride is already full",
            ));
        }
        if self.female_only && passenger.gender != Gender::Female {
            return Err(DomainError::new(
                ErrorCode::EligibilityDenied,
                "Sorry, this is a female-only ride",
            ));
        }
        Ok(())
    }

    /// Takes one seat out of the available pool.
    ///
    /// # Errors
    ///
    /// - `RideFull` if no seat is available
    pub fn take_seat(&mut self) -> Result<(), DomainError> {
        if self.available_seats < 1 {
            return Err(DomainError::new(
                ErrorCode::RideFull,
                "This ride is already full",
            ));
        }
        self.available_seats -= 1;
        Ok(())
    }

    /// Returns `seats` to the available pool.
    ///
    /// # Errors
    ///
    /// - `StorageConflict` if the result would exceed the ride's capacity,
    ///   which indicates a ledger/inventory mismatch
    pub fn return_seats(&mut self, seats: u32) -> Result<(), DomainError> {
        let restored = self.available_seats + seats;
        if restored > self.total_seats {
            return Err(DomainError::new(
                ErrorCode::StorageConflict,
                "Seat release would exceed ride capacity",
            ));
        }
        self.available_seats = restored;
        Ok(())
    }

    /// Clears the vehicle reference, keeping the ride's history intact.
    /// Used when the vehicle is deleted.
    pub fn detach_vehicle(&mut self) {
        self.vehicle_id = None;
    }

    /// Cancels the ride.
    ///
    /// # Errors
    ///
    /// - `RideNotScheduled` if it is already cancelled
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status != RideStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::RideNotScheduled,
                "This ride is no longer scheduled",
            ));
        }
        self.status = RideStatus::Cancelled;
        Ok(())
    }
}
