//! BookingEmailNotifier - consumes `booking.confirmed` and emails the driver.
//!
//! The decoupled half of the notification path: the coordinator publishes
//! and forgets; this handler owns delivery and its failures. It is safe to
//! re-run for the same event (the mail is merely sent again).

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::booking::BookingConfirmed;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{BookingNotice, EventHandler, Mailer};

/// Email consumer for booking confirmations.
pub struct BookingEmailNotifier {
    mailer: Arc<dyn Mailer>,
}

impl BookingEmailNotifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl EventHandler for BookingEmailNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let confirmed: BookingConfirmed = event.payload_as().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Malformed booking.confirmed payload: {}", e),
            )
        })?;

        self.mailer
            .send_booking_notice(&BookingNotice {
                driver_email: confirmed.driver_email,
                driver_name: confirmed.driver_name,
                passenger_name: confirmed.passenger_name,
                origin: confirmed.origin,
                destination: confirmed.destination,
            })
            .await
    }

    fn name(&self) -> &'static str {
        "BookingEmailNotifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::domain::foundation::{
        BookingId, EventId, RideId, SerializableDomainEvent, Timestamp, UserId,
    };
    use crate::ports::{EventPublisher, EventSubscriber};
    use std::sync::Mutex;

    struct CapturingMailer {
        notices: Mutex<Vec<BookingNotice>>,
    }

    #[async_trait]
    impl Mailer for CapturingMailer {
        async fn send_verification_code(
            &self,
            _to: &str,
            _username: &str,
            _code: &str,
            _expires_at: Timestamp,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn send_booking_notice(&self, notice: &BookingNotice) -> Result<(), DomainError> {
            self.notices.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    fn confirmed_event() -> BookingConfirmed {
        BookingConfirmed {
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
        }
    }

    #[tokio::test]
    async fn subscribed_notifier_mails_the_driver() {
        let mailer = Arc::new(CapturingMailer {
            notices: Mutex::new(Vec::new()),
        });
        let bus = InMemoryEventBus::new();
        bus.subscribe(
            "booking.confirmed",
            Arc::new(BookingEmailNotifier::new(mailer.clone())),
        );

        bus.publish(confirmed_event().to_envelope()).await.unwrap();

        let notices = mailer.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].driver_email, "ravi@example.com");
        assert_eq!(notices[0].passenger_name, "Asha");
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let mailer = Arc::new(CapturingMailer {
            notices: Mutex::new(Vec::new()),
        });
        let notifier = BookingEmailNotifier::new(mailer);

        let envelope = EventEnvelope {
            event_id: EventId::new(),
            event_type: "booking.confirmed".to_string(),
            aggregate_id: "x".to_string(),
            aggregate_type: "Booking".to_string(),
            occurred_at: Timestamp::now(),
            payload: serde_json::json!({"nonsense": true}),
        };

        assert!(notifier.handle(envelope).await.is_err());
    }
}
