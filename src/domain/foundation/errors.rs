//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFormat,

    // Not found errors (ownership mismatches fold into these)
    NotFound,

    // Booking rule rejections
    SelfBookingDenied,
    RideFull,
    RideNotScheduled,
    EligibilityDenied,
    AlreadyBooked,

    // Conflicts
    EmailTaken,
    RegistrationTaken,
    ScheduleOverlap,
    VehicleRequired,

    // Authentication / authorization
    Unauthorized,
    Forbidden,
    InvalidCredentials,
    EmailNotVerified,
    CodeRejected,

    // Infrastructure errors
    StorageConflict,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Whether the caller may retry the identical request and expect it to
    /// succeed once contention clears.
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorCode::StorageConflict)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::SelfBookingDenied => "SELF_BOOKING_DENIED",
            ErrorCode::RideFull => "RIDE_FULL",
            ErrorCode::RideNotScheduled => "RIDE_NOT_SCHEDULED",
            ErrorCode::EligibilityDenied => "ELIGIBILITY_DENIED",
            ErrorCode::AlreadyBooked => "ALREADY_BOOKED",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::RegistrationTaken => "REGISTRATION_TAKEN",
            ErrorCode::ScheduleOverlap => "SCHEDULE_OVERLAP",
            ErrorCode::VehicleRequired => "VEHICLE_REQUIRED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            ErrorCode::CodeRejected => "CODE_REJECTED",
            ErrorCode::StorageConflict => "STORAGE_CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a not-found error for an entity.
    pub fn not_found(entity: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", entity))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the detail map.
    pub fn details(&self) -> &HashMap<String, String> {
        &self.details
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
