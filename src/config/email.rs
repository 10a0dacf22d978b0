//! Email configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// How outbound mail is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailDelivery {
    /// Log messages instead of sending (development default).
    Console,
    /// Real SMTP delivery.
    Smtp,
}

/// Email configuration (SMTP)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Delivery mode
    #[serde(default = "default_delivery")]
    pub delivery: EmailDelivery,

    /// SMTP server host
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP authentication username
    #[serde(default)]
    pub smtp_username: String,

    /// SMTP authentication password
    #[serde(default = "default_smtp_password")]
    pub smtp_password: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self.delivery == EmailDelivery::Smtp
            && (self.smtp_host.is_empty() || self.smtp_username.is_empty())
        {
            return Err(ValidationError::IncompleteSmtpConfig);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            delivery: default_delivery(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: default_smtp_password(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_delivery() -> EmailDelivery {
    EmailDelivery::Console
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_password() -> SecretString {
    SecretString::new(String::new())
}

fn default_from_email() -> String {
    "noreply@rideshare.example".to_string()
}

fn default_from_name() -> String {
    "RideShare".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_console_delivery() {
        let config = EmailConfig::default();
        assert_eq!(config.delivery, EmailDelivery::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_header_formats_name_and_address() {
        let config = EmailConfig::default();
        assert_eq!(config.from_header(), "RideShare <noreply@rideshare.example>");
    }

    #[test]
    fn smtp_mode_requires_host_and_username() {
        let config = EmailConfig {
            delivery: EmailDelivery::Smtp,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::IncompleteSmtpConfig)
        );

        let config = EmailConfig {
            delivery: EmailDelivery::Smtp,
            smtp_host: "smtp.example.com".to_string(),
            smtp_username: "mailer".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_from_email_is_rejected() {
        let config = EmailConfig {
            from_email: "not-an-address".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidFromEmail));
    }
}
