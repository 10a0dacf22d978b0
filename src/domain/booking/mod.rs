//! Booking domain: the ledger of seat reservations.

mod booking;
mod events;

pub use booking::{Booking, BookingStatus, SEATS_PER_BOOKING};
pub use events::{BookingCancelled, BookingConfirmed, RideCancelled};
