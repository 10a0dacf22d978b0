//! PostgreSQL implementation of VehicleRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::ports::VehicleRepository;

use super::{map_db_err, sqlstate_in};

const VEHICLE_COLUMNS: &str = "vehicle_id, owner_id, model, registration_number, created_at";

/// PostgreSQL implementation of `VehicleRepository`.
#[derive(Clone)]
pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn insert(&self, vehicle: &Vehicle) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO vehicles (vehicle_id, owner_id, model, registration_number, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(vehicle.id().as_uuid())
        .bind(vehicle.owner_id().as_uuid())
        .bind(vehicle.model())
        .bind(vehicle.registration_number())
        .bind(vehicle.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if sqlstate_in(&e, &["23505"]) {
                DomainError::new(
                    ErrorCode::RegistrationTaken,
                    "This registration number is already in use",
                )
            } else {
                map_db_err("insert vehicle", e)
            }
        })?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Vehicle>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err("list vehicles", e))?;

        rows.into_iter().map(row_to_vehicle).collect()
    }

    async fn first_by_owner(&self, owner_id: &UserId) -> Result<Option<Vehicle>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE owner_id = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err("fetch first vehicle", e))?;

        row.map(row_to_vehicle).transpose()
    }
}

fn row_to_vehicle(row: PgRow) -> Result<Vehicle, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read vehicle row", e);

    Ok(Vehicle::reconstitute(
        VehicleId::from_uuid(row.try_get("vehicle_id").map_err(col_err)?),
        UserId::from_uuid(row.try_get("owner_id").map_err(col_err)?),
        row.try_get("model").map_err(col_err)?,
        row.try_get("registration_number").map_err(col_err)?,
        Timestamp::from_datetime(row.try_get("created_at").map_err(col_err)?),
    ))
}
