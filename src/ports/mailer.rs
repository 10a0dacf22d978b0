//! Mailer port - the notification sink.
//!
//! Delivery is best-effort by contract: callers on the transactional path
//! must treat a mailer failure as log-and-continue, never as a reason to
//! roll back committed state.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};

/// Data for a new-booking notice to the driver.
#[derive(Debug, Clone)]
pub struct BookingNotice {
    pub driver_email: String,
    pub driver_name: String,
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
}

/// Outbound mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a verification code to a new or updated address.
    async fn send_verification_code(
        &self,
        to: &str,
        username: &str,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Tells a driver that a passenger booked a seat.
    async fn send_booking_notice(&self, notice: &BookingNotice) -> Result<(), DomainError>;
}
