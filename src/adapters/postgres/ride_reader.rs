//! PostgreSQL implementation of RideReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::domain::foundation::{BookingId, DomainError, RideId, Timestamp, UserId};
use crate::domain::ride::RideStatus;
use crate::domain::user::Gender;
use crate::ports::{
    BookedRideSummary, ConfirmedPassenger, PublishedRideSummary, RideReader, RideSearchQuery,
    RideSearchResult,
};

use super::map_db_err;

/// PostgreSQL implementation of `RideReader`.
#[derive(Clone)]
pub struct PostgresRideReader {
    pool: PgPool,
}

impl PostgresRideReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideReader for PostgresRideReader {
    async fn search(
        &self,
        query: &RideSearchQuery,
        now: Timestamp,
    ) -> Result<Vec<RideSearchResult>, DomainError> {
        let rows = sqlx::query(
            "SELECT r.ride_id, r.origin, r.destination, r.departure_time, \
                    r.available_seats, r.price_per_seat, r.is_female_only, \
                    u.user_id AS driver_id, u.username AS driver_name, u.gender AS driver_gender, \
                    v.model AS vehicle_model, v.registration_number \
             FROM rides r \
             JOIN users u ON r.driver_id = u.user_id \
             LEFT JOIN vehicles v ON r.vehicle_id = v.vehicle_id \
             WHERE r.departure_time > $1 \
               AND r.available_seats > 0 \
               AND r.status = 'scheduled' \
               AND ($2::text IS NULL OR r.origin ILIKE '%' || $2 || '%') \
               AND ($3::text IS NULL OR r.destination ILIKE '%' || $3 || '%') \
             ORDER BY r.departure_time ASC",
        )
        .bind(now.as_datetime())
        .bind(query.origin.as_deref())
        .bind(query.destination.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err("search rides", e))?;

        rows.into_iter().map(row_to_search_result).collect()
    }

    async fn published_by_driver(
        &self,
        driver_id: &UserId,
    ) -> Result<Vec<PublishedRideSummary>, DomainError> {
        let ride_rows = sqlx::query(
            "SELECT ride_id, origin, destination, departure_time, total_seats, \
                    available_seats, price_per_seat, is_female_only, status \
             FROM rides \
             WHERE driver_id = $1 AND status = 'scheduled' \
             ORDER BY departure_time DESC",
        )
        .bind(driver_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err("list published rides", e))?;

        let mut summaries = Vec::with_capacity(ride_rows.len());
        for row in ride_rows {
            let mut summary = row_to_published_summary(row)?;

            let passenger_rows = sqlx::query(
                "SELECT u.user_id, u.username \
                 FROM bookings b \
                 JOIN users u ON b.passenger_id = u.user_id \
                 WHERE b.ride_id = $1 AND b.status = 'confirmed'",
            )
            .bind(summary.ride_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_err("list ride passengers", e))?;

            summary.passengers = passenger_rows
                .into_iter()
                .map(row_to_passenger)
                .collect::<Result<_, _>>()?;
            summaries.push(summary);
        }

        Ok(summaries)
    }

    async fn booked_by_passenger(
        &self,
        passenger_id: &UserId,
    ) -> Result<Vec<BookedRideSummary>, DomainError> {
        let rows = sqlx::query(
            "SELECT b.booking_id, b.seats_booked, \
                    r.ride_id, r.origin, r.destination, r.departure_time, r.price_per_seat, \
                    d.username AS driver_name, d.phone_number AS driver_phone \
             FROM bookings b \
             JOIN rides r ON b.ride_id = r.ride_id \
             JOIN users d ON r.driver_id = d.user_id \
             WHERE b.passenger_id = $1 AND b.status = 'confirmed' \
             ORDER BY r.departure_time ASC",
        )
        .bind(passenger_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err("list booked rides", e))?;

        rows.into_iter().map(row_to_booked_summary).collect()
    }
}

fn row_to_search_result(row: PgRow) -> Result<RideSearchResult, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read search row", e);

    let gender_str: String = row.try_get("driver_gender").map_err(col_err)?;

    Ok(RideSearchResult {
        ride_id: RideId::from_uuid(row.try_get("ride_id").map_err(col_err)?),
        origin: row.try_get("origin").map_err(col_err)?,
        destination: row.try_get("destination").map_err(col_err)?,
        departure_time: Timestamp::from_datetime(
            row.try_get("departure_time").map_err(col_err)?,
        ),
        available_seats: row.try_get::<i32, _>("available_seats").map_err(col_err)? as u32,
        price_per_seat: row.try_get("price_per_seat").map_err(col_err)?,
        female_only: row.try_get("is_female_only").map_err(col_err)?,
        driver_id: UserId::from_uuid(row.try_get("driver_id").map_err(col_err)?),
        driver_name: row.try_get("driver_name").map_err(col_err)?,
        driver_gender: Gender::from_str(&gender_str)?,
        vehicle_model: row.try_get("vehicle_model").map_err(col_err)?,
        registration_number: row.try_get("registration_number").map_err(col_err)?,
    })
}

fn row_to_published_summary(row: PgRow) -> Result<PublishedRideSummary, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read published row", e);

    let status_str: String = row.try_get("status").map_err(col_err)?;

    Ok(PublishedRideSummary {
        ride_id: RideId::from_uuid(row.try_get("ride_id").map_err(col_err)?),
        origin: row.try_get("origin").map_err(col_err)?,
        destination: row.try_get("destination").map_err(col_err)?,
        departure_time: Timestamp::from_datetime(
            row.try_get("departure_time").map_err(col_err)?,
        ),
        total_seats: row.try_get::<i32, _>("total_seats").map_err(col_err)? as u32,
        available_seats: row.try_get::<i32, _>("available_seats").map_err(col_err)? as u32,
        price_per_seat: row.try_get("price_per_seat").map_err(col_err)?,
        female_only: row.try_get("is_female_only").map_err(col_err)?,
        status: RideStatus::from_str(&status_str)?,
        passengers: Vec::new(),
    })
}

fn row_to_passenger(row: PgRow) -> Result<ConfirmedPassenger, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read passenger row", e);

    Ok(ConfirmedPassenger {
        user_id: UserId::from_uuid(row.try_get("user_id").map_err(col_err)?),
        username: row.try_get("username").map_err(col_err)?,
    })
}

fn row_to_booked_summary(row: PgRow) -> Result<BookedRideSummary, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read booked row", e);

    Ok(BookedRideSummary {
        booking_id: BookingId::from_uuid(row.try_get("booking_id").map_err(col_err)?),
        ride_id: RideId::from_uuid(row.try_get("ride_id").map_err(col_err)?),
        origin: row.try_get("origin").map_err(col_err)?,
        destination: row.try_get("destination").map_err(col_err)?,
        departure_time: Timestamp::from_datetime(
            row.try_get("departure_time").map_err(col_err)?,
        ),
        price_per_seat: row.try_get("price_per_seat").map_err(col_err)?,
        seats_booked: row.try_get::<i32, _>("seats_booked").map_err(col_err)? as u32,
        driver_name: row.try_get("driver_name").map_err(col_err)?,
        driver_phone: row.try_get("driver_phone").map_err(col_err)?,
    })
}
