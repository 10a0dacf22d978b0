//! Booking domain events, published after the atomic unit commits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, DomainEvent, EventId, RideId, Timestamp, UserId,
};

/// A seat was reserved and committed. Carries everything the notification
/// consumer needs so it never has to read back through the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmed {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub ride_id: RideId,
    pub passenger_id: UserId,
    pub passenger_name: String,
    pub driver_name: String,
    pub driver_email: String,
    pub origin: String,
    pub destination: String,
    pub confirmed_at: Timestamp,
}

impl DomainEvent for BookingConfirmed {
    fn event_type(&self) -> &'static str {
        "booking.confirmed"
    }

    fn aggregate_id(&self) -> String {
        self.booking_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Booking"
    }

    fn occurred_at(&self) -> Timestamp {
        self.confirmed_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

/// A confirmed booking was released by its passenger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelled {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub ride_id: RideId,
    pub passenger_id: UserId,
    pub seats_returned: u32,
    pub cancelled_at: Timestamp,
}

impl DomainEvent for BookingCancelled {
    fn event_type(&self) -> &'static str {
        "booking.cancelled"
    }

    fn aggregate_id(&self) -> String {
        self.booking_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Booking"
    }

    fn occurred_at(&self) -> Timestamp {
        self.cancelled_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

/// A driver cancelled a ride; every booking on it was flipped to cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideCancelled {
    pub event_id: EventId,
    pub ride_id: RideId,
    pub driver_id: UserId,
    pub bookings_cancelled: u64,
    pub cancelled_at: Timestamp,
}

impl DomainEvent for RideCancelled {
    fn event_type(&self) -> &'static str {
        "ride.cancelled"
    }

    fn aggregate_id(&self) -> String {
        self.ride_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Ride"
    }

    fn occurred_at(&self) -> Timestamp {
        self.cancelled_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn booking_confirmed_envelope_routes_by_type() {
        let event = BookingConfirmed {
            event_id: EventId::new(),
            booking_id: BookingId::new(),
            ride_id: RideId::new(),
            passenger_id: UserId::new(),
            passenger_name: "Asha".to_string(),
            driver_name: "Ravi".to_string(),
            driver_email: "ravi@example.com".to_string(),
            origin: "Pune".to_string(),
            destination: "Mumbai".to_string(),
            confirmed_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "booking.confirmed");
        assert_eq!(envelope.aggregate_type, "Booking");

        let decoded: BookingConfirmed = envelope.payload_as().unwrap();
        assert_eq!(decoded.driver_email, "ravi@example.com");
    }
}
