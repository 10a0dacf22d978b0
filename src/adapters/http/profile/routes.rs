//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    get_profile, send_phone_code, update_profile, verify_phone_code, ProfileHandlers,
};

/// Creates the profile router. All endpoints require authentication.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile))
        .route("/send-phone-otp", post(send_phone_code))
        .route("/verify-phone-otp", post(verify_phone_code))
        .with_state(handlers)
}
