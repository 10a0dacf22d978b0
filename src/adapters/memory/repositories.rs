//! In-memory repositories for testing the CRUD handlers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::ride::{Ride, RideStatus};
use crate::domain::user::User;
use crate::domain::vehicle::Vehicle;
use crate::ports::{RideRepository, UserRepository, VehicleRepository};

/// In-memory implementation of `UserRepository`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().expect("InMemoryUserRepository: lock poisoned");
        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "An account with this email already exists",
            ));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().expect("InMemoryUserRepository: lock poisoned");
        if !users.contains_key(user.id()) {
            return Err(DomainError::not_found("User"));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .expect("InMemoryUserRepository: lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .expect("InMemoryUserRepository: lock poisoned")
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }
}

/// In-memory implementation of `VehicleRepository`.
#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn insert(&self, vehicle: &Vehicle) -> Result<(), DomainError> {
        let mut vehicles = self
            .vehicles
            .write()
            .expect("InMemoryVehicleRepository: lock poisoned");
        if vehicles
            .iter()
            .any(|v| v.registration_number() == vehicle.registration_number())
        {
            return Err(DomainError::new(
                ErrorCode::RegistrationTaken,
                "This registration number is already in use",
            ));
        }
        vehicles.push(vehicle.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Vehicle>, DomainError> {
        Ok(self
            .vehicles
            .read()
            .expect("InMemoryVehicleRepository: lock poisoned")
            .iter()
            .filter(|v| v.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn first_by_owner(&self, owner_id: &UserId) -> Result<Option<Vehicle>, DomainError> {
        Ok(self
            .vehicles
            .read()
            .expect("InMemoryVehicleRepository: lock poisoned")
            .iter()
            .find(|v| v.owner_id() == owner_id)
            .cloned())
    }
}

/// In-memory implementation of `RideRepository`.
#[derive(Default)]
pub struct InMemoryRideRepository {
    rides: RwLock<Vec<Ride>>,
}

impl InMemoryRideRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored ride.
    pub fn all(&self) -> Vec<Ride> {
        self.rides
            .read()
            .expect("InMemoryRideRepository: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl RideRepository for InMemoryRideRepository {
    async fn insert(&self, ride: &Ride) -> Result<(), DomainError> {
        self.rides
            .write()
            .expect("InMemoryRideRepository: lock poisoned")
            .push(ride.clone());
        Ok(())
    }

    async fn has_overlapping_scheduled(
        &self,
        driver_id: &UserId,
        departure_time: Timestamp,
        buffer_hours: i64,
    ) -> Result<bool, DomainError> {
        let from = departure_time.minus_hours(buffer_hours);
        let to = departure_time.plus_hours(buffer_hours);
        Ok(self
            .rides
            .read()
            .expect("InMemoryRideRepository: lock poisoned")
            .iter()
            .any(|r| {
                r.driver_id() == driver_id
                    && r.status() == RideStatus::Scheduled
                    && !r.departure_time().is_before(&from)
                    && !r.departure_time().is_after(&to)
            }))
    }
}
