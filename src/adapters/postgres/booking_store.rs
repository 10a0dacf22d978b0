//! PostgreSQL implementation of the booking unit of work.
//!
//! `begin` opens a transaction; `lock_ride` / `lock_confirmed_booking`
//! issue `SELECT ... FOR UPDATE`, so every concurrent unit touching the
//! same ride serializes on the row lock until commit or rollback. The
//! `bookings (ride_id, passenger_id)` unique constraint and the
//! `available_seats` range CHECK back the coordinator up at the schema
//! level; violations surface as retriable `StorageConflict`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::str::FromStr;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, RideId, Timestamp, UserId, VehicleId,
};
use crate::domain::ride::{Ride, RideStatus};
use crate::ports::{BookingLedger, BookingStore, BookingTx, RideInventory};

use super::map_db_err;

const RIDE_COLUMNS: &str = "ride_id, driver_id, vehicle_id, origin, destination, departure_time, \
     total_seats, available_seats, price_per_seat, is_female_only, status, created_at";

const BOOKING_COLUMNS: &str =
    "booking_id, ride_id, passenger_id, seats_booked, status, created_at, updated_at";

/// PostgreSQL implementation of `BookingStore`.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTx>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err("begin booking unit", e))?;
        Ok(Box::new(PgBookingTx { tx }))
    }
}

/// One open transaction. Dropping it without commit rolls back.
struct PgBookingTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RideInventory for PgBookingTx {
    async fn lock_ride(&mut self, ride_id: &RideId) -> Result<Option<Ride>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides WHERE ride_id = $1 FOR UPDATE"
        ))
        .bind(ride_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("lock ride", e))?;

        row.map(row_to_ride).transpose()
    }

    async fn lock_scheduled_ride_owned(
        &mut self,
        ride_id: &RideId,
        driver_id: &UserId,
    ) -> Result<Option<Ride>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides \
             WHERE ride_id = $1 AND driver_id = $2 AND status = 'scheduled' FOR UPDATE"
        ))
        .bind(ride_id.as_uuid())
        .bind(driver_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("lock owned ride", e))?;

        row.map(row_to_ride).transpose()
    }

    async fn adjust_available_seats(
        &mut self,
        ride_id: &RideId,
        delta: i64,
    ) -> Result<(), DomainError> {
        // The seats_within_capacity CHECK rejects results outside
        // 0..=total_seats; map_db_err turns that into StorageConflict.
        let result = sqlx::query(
            "UPDATE rides SET available_seats = available_seats + $2 WHERE ride_id = $1",
        )
        .bind(ride_id.as_uuid())
        .bind(delta as i32)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("adjust seats", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Ride"));
        }
        Ok(())
    }

    async fn mark_ride_cancelled(&mut self, ride_id: &RideId) -> Result<(), DomainError> {
        sqlx::query("UPDATE rides SET status = 'cancelled' WHERE ride_id = $1")
            .bind(ride_id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_err("cancel ride", e))?;
        Ok(())
    }

    async fn cancel_scheduled_rides_for_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        now: Timestamp,
    ) -> Result<Vec<RideId>, DomainError> {
        let rows = sqlx::query(
            "UPDATE rides SET status = 'cancelled' \
             WHERE vehicle_id = $1 AND status = 'scheduled' AND departure_time > $2 \
             RETURNING ride_id",
        )
        .bind(vehicle_id.as_uuid())
        .bind(now.as_datetime())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("cancel vehicle rides", e))?;

        rows.into_iter()
            .map(|row| {
                let id: uuid::Uuid = row
                    .try_get("ride_id")
                    .map_err(|e| map_db_err("read ride_id", e))?;
                Ok(RideId::from_uuid(id))
            })
            .collect()
    }
}

#[async_trait]
impl BookingLedger for PgBookingTx {
    async fn find_booking(
        &mut self,
        ride_id: &RideId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE ride_id = $1 AND passenger_id = $2"
        ))
        .bind(ride_id.as_uuid())
        .bind(passenger_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("find booking", e))?;

        row.map(row_to_booking).transpose()
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO bookings \
             (booking_id, ride_id, passenger_id, seats_booked, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(booking.id().as_uuid())
        .bind(booking.ride_id().as_uuid())
        .bind(booking.passenger_id().as_uuid())
        .bind(booking.seats_booked() as i32)
        .bind(booking.status().as_str())
        .bind(booking.created_at().as_datetime())
        .bind(booking.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("insert booking", e))?;
        Ok(())
    }

    async fn reactivate_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'confirmed', updated_at = $2 \
             WHERE booking_id = $1 AND status = 'cancelled'",
        )
        .bind(booking_id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("reactivate booking", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::StorageConflict,
                "Booking is no longer cancelled",
            ));
        }
        Ok(())
    }

    async fn cancel_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled', updated_at = $2 \
             WHERE booking_id = $1 AND status = 'confirmed'",
        )
        .bind(booking_id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("cancel booking", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::StorageConflict,
                "Booking is no longer confirmed",
            ));
        }
        Ok(())
    }

    async fn lock_confirmed_booking(
        &mut self,
        booking_id: &BookingId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE booking_id = $1 AND passenger_id = $2 AND status = 'confirmed' FOR UPDATE"
        ))
        .bind(booking_id.as_uuid())
        .bind(passenger_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("lock booking", e))?;

        row.map(row_to_booking).transpose()
    }

    async fn cancel_bookings_for_ride(&mut self, ride_id: &RideId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled', updated_at = $2 \
             WHERE ride_id = $1 AND status = 'confirmed'",
        )
        .bind(ride_id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_err("cascade bookings", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl BookingTx for PgBookingTx {
    async fn delete_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        owner_id: &UserId,
    ) -> Result<bool, DomainError> {
        // rides.vehicle_id is ON DELETE SET NULL, so history survives.
        let result = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = $1 AND owner_id = $2")
            .bind(vehicle_id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_err("delete vehicle", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| map_db_err("commit booking unit", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| map_db_err("rollback booking unit", e))
    }
}

fn row_to_ride(row: PgRow) -> Result<Ride, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read ride row", e);

    let status_str: String = row.try_get("status").map_err(col_err)?;
    let status = RideStatus::from_str(&status_str)?;

    Ok(Ride::reconstitute(
        RideId::from_uuid(row.try_get("ride_id").map_err(col_err)?),
        UserId::from_uuid(row.try_get("driver_id").map_err(col_err)?),
        row.try_get::<Option<uuid::Uuid>, _>("vehicle_id")
            .map_err(col_err)?
            .map(VehicleId::from_uuid),
        row.try_get("origin").map_err(col_err)?,
        row.try_get("destination").map_err(col_err)?,
        Timestamp::from_datetime(row.try_get("departure_time").map_err(col_err)?),
        row.try_get::<i32, _>("total_seats")
            .map_err(col_err)? as u32,
        row.try_get::<i32, _>("available_seats")
            .map_err(col_err)? as u32,
        row.try_get("price_per_seat").map_err(col_err)?,
        row.try_get("is_female_only").map_err(col_err)?,
        status,
        Timestamp::from_datetime(row.try_get("created_at").map_err(col_err)?),
    ))
}

fn row_to_booking(row: PgRow) -> Result<Booking, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read booking row", e);

    let status_str: String = row.try_get("status").map_err(col_err)?;
    let status = BookingStatus::from_str(&status_str)?;

    Ok(Booking::reconstitute(
        BookingId::from_uuid(row.try_get("booking_id").map_err(col_err)?),
        RideId::from_uuid(row.try_get("ride_id").map_err(col_err)?),
        UserId::from_uuid(row.try_get("passenger_id").map_err(col_err)?),
        row.try_get::<i32, _>("seats_booked")
            .map_err(col_err)? as u32,
        status,
        Timestamp::from_datetime(row.try_get("created_at").map_err(col_err)?),
        Timestamp::from_datetime(row.try_get("updated_at").map_err(col_err)?),
    ))
}
