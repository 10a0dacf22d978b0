//! Console mailer for development and testing.
//!
//! Writes mail to the log instead of sending it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{BookingNotice, Mailer};

/// Log-only implementation of `Mailer`.
#[derive(Clone, Debug, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_verification_code(
        &self,
        to: &str,
        username: &str,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<(), DomainError> {
        tracing::info!(
            to = %to,
            username = %username,
            code = %code,
            expires_at = %expires_at.as_datetime(),
            "Verification code email (console mode)"
        );
        Ok(())
    }

    async fn send_booking_notice(&self, notice: &BookingNotice) -> Result<(), DomainError> {
        tracing::info!(
            to = %notice.driver_email,
            passenger = %notice.passenger_name,
            origin = %notice.origin,
            destination = %notice.destination,
            "Booking notice email (console mode)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn console_mailer_never_fails() {
        let mailer = ConsoleMailer::new();
        mailer
            .send_verification_code("a@b.com", "asha", "123456", Timestamp::now())
            .await
            .unwrap();
        mailer
            .send_booking_notice(&BookingNotice {
                driver_email: "d@b.com".to_string(),
                driver_name: "Ravi".to_string(),
                passenger_name: "Asha".to_string(),
                origin: "Pune".to_string(),
                destination: "Mumbai".to_string(),
            })
            .await
            .unwrap();
    }
}
