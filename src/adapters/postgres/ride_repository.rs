//! PostgreSQL implementation of RideRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ride::Ride;
use crate::ports::RideRepository;

use super::map_db_err;

/// PostgreSQL implementation of `RideRepository`.
#[derive(Clone)]
pub struct PostgresRideRepository {
    pool: PgPool,
}

impl PostgresRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideRepository for PostgresRideRepository {
    async fn insert(&self, ride: &Ride) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO rides \
             (ride_id, driver_id, vehicle_id, origin, destination, departure_time, \
              total_seats, available_seats, price_per_seat, is_female_only, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(ride.id().as_uuid())
        .bind(ride.driver_id().as_uuid())
        .bind(ride.vehicle_id().map(|v| *v.as_uuid()))
        .bind(ride.origin())
        .bind(ride.destination())
        .bind(ride.departure_time().as_datetime())
        .bind(ride.total_seats() as i32)
        .bind(ride.available_seats() as i32)
        .bind(ride.price_per_seat())
        .bind(ride.is_female_only())
        .bind(ride.status().as_str())
        .bind(ride.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err("insert ride", e))?;
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

        let row = sqlx::query(
            "SELECT EXISTS( \
                SELECT 1 FROM rides \
                WHERE driver_id = $1 AND status = 'scheduled' \
                  AND departure_time BETWEEN $2 AND $3 \
             ) AS overlaps",
        )
        .bind(driver_id.as_uuid())
        .bind(from.as_datetime())
        .bind(to.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err("check ride overlap", e))?;

        row.try_get("overlaps")
            .map_err(|e| map_db_err("read overlap flag", e))
    }
}
