//! Profile handlers.

mod profile;

pub use profile::{
    GetProfileHandler, ProfileView, UpdateProfileCommand, UpdateProfileHandler,
};
