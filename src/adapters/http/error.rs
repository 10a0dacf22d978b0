//! Mapping from domain errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wire shape for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Renders a domain error as an HTTP response.
///
/// Booking-rule rejections are 400s like any other validation failure;
/// conflicts (including retriable storage conflicts) are 409; ownership
/// mismatches arrive here already folded into `NotFound`.
pub fn error_response(error: DomainError) -> Response {
    let status = match error.code() {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidFormat
        | ErrorCode::SelfBookingDenied
        | ErrorCode::RideFull
        | ErrorCode::RideNotScheduled
        | ErrorCode::CodeRejected => StatusCode::BAD_REQUEST,

        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,

        ErrorCode::Forbidden | ErrorCode::EligibilityDenied | ErrorCode::EmailNotVerified => {
            StatusCode::FORBIDDEN
        }

        ErrorCode::NotFound | ErrorCode::VehicleRequired => StatusCode::NOT_FOUND,

        ErrorCode::AlreadyBooked
        | ErrorCode::EmailTaken
        | ErrorCode::RegistrationTaken
        | ErrorCode::ScheduleOverlap
        | ErrorCode::StorageConflict => StatusCode::CONFLICT,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(code = %error.code(), message = %error.message(), "Internal error");
        ErrorResponse {
            code: error.code().to_string(),
            message: "An internal error occurred".to_string(),
        }
    } else {
        ErrorResponse {
            code: error.code().to_string(),
            message: error.message().to_string(),
        }
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_rules_map_to_400() {
        for code in [
            ErrorCode::SelfBookingDenied,
            ErrorCode::RideFull,
            ErrorCode::RideNotScheduled,
        ] {
            let response = error_response(DomainError::new(code, "no"));
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn conflicts_map_to_409() {
        for code in [
            ErrorCode::AlreadyBooked,
            ErrorCode::EmailTaken,
            ErrorCode::ScheduleOverlap,
            ErrorCode::StorageConflict,
        ] {
            let response = error_response(DomainError::new(code, "taken"));
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn eligibility_maps_to_403_and_not_found_to_404() {
        assert_eq!(
            error_response(DomainError::new(ErrorCode::EligibilityDenied, "no")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_response(DomainError::not_found("Ride")).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = error_response(DomainError::new(
            ErrorCode::DatabaseError,
            "connection string with secrets",
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
