//! Event consumers that turn domain events into outbound notifications.

mod booking_email;

pub use booking_email::BookingEmailNotifier;
