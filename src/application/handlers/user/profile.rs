//! Profile read and update handlers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Gender, PhoneNumber, User};
use crate::ports::UserRepository;

/// The profile fields exposed to the owner.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub phone_verified: bool,
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        Self {
            user_id: *user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            gender: user.gender(),
            phone_number: user.phone().map(|p| p.as_str().to_string()),
            phone_verified: user.is_phone_verified(),
        }
    }
}

/// Handler for reading the caller's profile.
pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<ProfileView, DomainError> {
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        Ok(ProfileView::from(&user))
    }
}

/// Command to update the caller's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub username: String,
    pub phone_number: Option<String>,
    pub gender: Gender,
}

/// Handler for profile updates.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileView, DomainError> {
        let phone = cmd
            .phone_number
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        user.update_profile(cmd.username, phone, cmd.gender)?;
        self.users.update(&user).await?;

        Ok(ProfileView::from(&user))
    }
}
