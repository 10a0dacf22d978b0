//! SMTP mailer using lettre's async transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{BookingNotice, Mailer};

/// SMTP implementation of `Mailer`.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_header: String,
}

impl SmtpMailer {
    /// Builds the relay transport from configuration.
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("SMTP relay error: {}", e))
            })?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_header: config.from_header(),
        })
    }

    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), DomainError> {
        let message = Message::builder()
            .from(self.from_header.parse().map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Bad from header: {}", e))
            })?)
            .to(to.parse().map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Bad recipient: {}", e))
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| {
                DomainError::new(ErrorCode::InternalError, format!("Message build error: {}", e))
            })?;

        self.transport.send(message).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("SMTP send error: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(
        &self,
        to: &str,
        _username: &str,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<(), DomainError> {
        let minutes = (*expires_at.as_datetime() - chrono::Utc::now()).num_minutes();
        let html = format!(
            "<p>Your verification code is: <b>{}</b>. It will expire in {} minutes.</p>",
            code, minutes
        );
        self.send(to, "Your RideShare Verification Code", html).await
    }

    async fn send_booking_notice(&self, notice: &BookingNotice) -> Result<(), DomainError> {
        let html = format!(
            "<p>Hi {}, <b>{}</b> has booked a seat on your ride from <b>{}</b> to <b>{}</b>.</p>",
            notice.driver_name, notice.passenger_name, notice.origin, notice.destination
        );
        self.send(&notice.driver_email, "You have a new booking!", html)
            .await
    }
}
