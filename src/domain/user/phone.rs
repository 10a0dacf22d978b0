//! Phone number value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A 10-digit Indian mobile number. The first digit must be 6-9.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parses and validates a phone number.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the number is not 10 digits starting with 6-9
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        let valid = digits.len() == 10
            && digits.chars().all(|c| c.is_ascii_digit())
            && matches!(digits.as_bytes()[0], b'6'..=b'9');

        if !valid {
            return Err(DomainError::new(
                ErrorCode::InvalidFormat,
                "Please enter a valid 10-digit Indian phone number",
            ));
        }

        Ok(Self(digits))
    }

    /// Returns the digits as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
