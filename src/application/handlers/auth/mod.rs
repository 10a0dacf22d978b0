//! Auth handlers: signup, verification codes, and login.

mod log_in;
mod phone_codes;
mod sign_up;
mod verify_email;

pub use log_in::{LogInCommand, LogInHandler, LogInResult};
pub use phone_codes::{
    SendPhoneCodeCommand, SendPhoneCodeHandler, VerifyPhoneCodeCommand, VerifyPhoneCodeHandler,
};
pub use sign_up::{SignUpCommand, SignUpHandler, SignUpResult};
pub use verify_email::{VerifyEmailCommand, VerifyEmailHandler};

use rand::Rng;

/// Verification codes stay valid for ten minutes.
pub(crate) const CODE_TTL_SECS: i64 = 600;

/// Generates a 6-digit one-time code.
pub(crate) fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}
