//! Vehicle entity.

use crate::domain::foundation::{DomainError, Timestamp, UserId, VehicleId};

/// A vehicle registered by a driver.
///
/// # Invariants
///
/// - `registration_number` is stored normalized: uppercase, no spaces or
///   dashes (e.g. "DL01AB1234")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: VehicleId,
    owner_id: UserId,
    model: String,
    registration_number: String,
    created_at: Timestamp,
}

impl Vehicle {
    /// Registers a new vehicle, normalizing the registration number.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the model is empty
    /// - `InvalidFormat` if the registration number does not match the
    ///   state-code / district / series / number layout
    pub fn register(
        id: VehicleId,
        owner_id: UserId,
        model: String,
        registration_number: &str,
    ) -> Result<Self, DomainError> {
        if model.trim().is_empty() {
            return Err(DomainError::validation("model", "Model cannot be empty"));
        }

        let normalized = normalize_registration(registration_number)?;

        Ok(Self {
            id,
            owner_id,
            model,
            registration_number: normalized,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a vehicle from persistence (no validation).
    pub fn reconstitute(
        id: VehicleId,
        owner_id: UserId,
        model: String,
        registration_number: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            model,
            registration_number,
            created_at,
        }
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Normalizes a registration number to uppercase without separators and
/// checks the segment layout: two letters, 1-2 digits, 1-3 letters, 1-4
/// digits (e.g. "DL01AB1234", "dl-01-ab-1234").
fn normalize_registration(raw: &str) -> Result<String, DomainError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let bytes = cleaned.as_bytes();
    let take = |from: usize, pred: fn(&u8) -> bool| {
        bytes[from..].iter().take_while(|b| pred(*b)).count()
    };

    let invalid = || {
        DomainError::new(
            crate::domain::foundation::ErrorCode::InvalidFormat,
            "Invalid registration number format. Please use a valid format (e.g., DL01AB1234)",
        )
    };

    let state = take(0, u8::is_ascii_uppercase);
    if state != 2 {
        return Err(invalid());
    }
    let district = take(2, u8::is_ascii_digit);
    if !(1..=2).contains(&district) {
        return Err(invalid());
    }
    let series = take(2 + district, u8::is_ascii_uppercase);
    if !(1..=3).contains(&series) {
        return Err(invalid());
    }
    let number = take(2 + district + series, u8::is_ascii_digit);
    if !(1..=4).contains(&number) || 2 + district + series + number != bytes.len() {
        return Err(invalid());
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(reg: &str) -> Result<Vehicle, DomainError> {
        Vehicle::register(VehicleId::new(), UserId::new(), "Swift".to_string(), reg)
    }

    #[test]
    fn normalizes_case_and_separators() {
        let vehicle = register("dl-01 ab-1234").unwrap();
        assert_eq!(vehicle.registration_number(), "DL01AB1234");
    }

    #[test]
    fn accepts_short_segments() {
        assert!(register("MH1A1").is_ok());
        assert!(register("KA05MX9876").is_ok());
    }

    #[test]
    fn rejects_malformed_numbers() {
        for reg in ["1234", "DLAB1234", "DL01AB12345", "DL01AB", "D101AB1234", ""] {
            assert!(register(reg).is_err(), "{reg} should be rejected");
        }
    }

    #[test]
    fn rejects_empty_model() {
        let result = Vehicle::register(VehicleId::new(), UserId::new(), " ".to_string(), "DL01AB1234");
        assert!(result.is_err());
    }
}
