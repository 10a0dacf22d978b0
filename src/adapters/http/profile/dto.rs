//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::user::ProfileView;
use crate::domain::user::Gender;

/// The caller's profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub is_phone_verified: bool,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            user_id: view.user_id.to_string(),
            username: view.username,
            email: view.email,
            gender: view.gender,
            phone_number: view.phone_number,
            is_phone_verified: view.phone_verified,
        }
    }
}

/// Request to update profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub phone_number: Option<String>,
    pub gender: Gender,
}

/// Request to start phone verification.
#[derive(Debug, Clone, Deserialize)]
pub struct SendPhoneCodeRequest {
    pub phone_number: String,
}

/// Request to confirm phone verification.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPhoneCodeRequest {
    pub code: String,
}
