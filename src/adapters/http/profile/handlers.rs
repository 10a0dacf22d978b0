//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::auth::MessageResponse;
use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::auth::{
    SendPhoneCodeCommand, SendPhoneCodeHandler, VerifyPhoneCodeCommand, VerifyPhoneCodeHandler,
};
use crate::application::handlers::user::{
    GetProfileHandler, UpdateProfileCommand, UpdateProfileHandler,
};

use super::dto::{
    ProfileResponse, SendPhoneCodeRequest, UpdateProfileRequest, VerifyPhoneCodeRequest,
};

/// Handler bundle for the profile router.
#[derive(Clone)]
pub struct ProfileHandlers {
    get_profile: Arc<GetProfileHandler>,
    update_profile: Arc<UpdateProfileHandler>,
    send_phone_code: Arc<SendPhoneCodeHandler>,
    verify_phone_code: Arc<VerifyPhoneCodeHandler>,
}

impl ProfileHandlers {
    pub fn new(
        get_profile: Arc<GetProfileHandler>,
        update_profile: Arc<UpdateProfileHandler>,
        send_phone_code: Arc<SendPhoneCodeHandler>,
        verify_phone_code: Arc<VerifyPhoneCodeHandler>,
    ) -> Self {
        Self {
            get_profile,
            update_profile,
            send_phone_code,
            verify_phone_code,
        }
    }
}

/// GET /api/user/profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.get_profile.handle(user.id).await {
        Ok(view) => (StatusCode::OK, Json(ProfileResponse::from(view))).into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/user/profile
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        username: req.username,
        phone_number: req.phone_number,
        gender: req.gender,
    };

    match handlers.update_profile.handle(cmd).await {
        Ok(view) => (StatusCode::OK, Json(ProfileResponse::from(view))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/user/send-phone-otp
pub async fn send_phone_code(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SendPhoneCodeRequest>,
) -> Response {
    let cmd = SendPhoneCodeCommand {
        user_id: user.id,
        phone_number: req.phone_number,
    };

    match handlers.send_phone_code.handle(cmd).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new("Verification code sent")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/user/verify-phone-otp
pub async fn verify_phone_code(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<VerifyPhoneCodeRequest>,
) -> Response {
    let cmd = VerifyPhoneCodeCommand {
        user_id: user.id,
        code: req.code,
    };

    match handlers.verify_phone_code.handle(cmd).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new("Phone number verified successfully!")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
