//! User domain: registration, verification, and identity snapshots.

mod gender;
mod phone;
mod snapshot;
mod user;

pub use gender::Gender;
pub use phone::PhoneNumber;
pub use snapshot::PassengerSnapshot;
pub use user::{OneTimeCode, User, MAX_USERNAME_LENGTH};
