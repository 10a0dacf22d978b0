//! PostgreSQL adapters.
//!
//! All queries go through runtime-checked `sqlx::query` with explicit
//! binds and row-mapping helpers; the booking unit of work additionally
//! wraps everything in one `sqlx::Transaction` with `FOR UPDATE` locks.

mod booking_store;
mod passenger_directory;
mod ride_reader;
mod ride_repository;
mod user_repository;
mod vehicle_repository;

pub use booking_store::PostgresBookingStore;
pub use passenger_directory::PostgresPassengerDirectory;
pub use ride_reader::PostgresRideReader;
pub use ride_repository::PostgresRideRepository;
pub use user_repository::PostgresUserRepository;
pub use vehicle_repository::PostgresVehicleRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Builds the connection pool from configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations completed");
    Ok(())
}

/// Postgres SQLSTATE codes that mean "the unit lost a race, retry":
/// unique violation, check violation, serialization failure, deadlock,
/// lock-wait timeout.
const CONFLICT_SQLSTATES: [&str; 5] = ["23505", "23514", "40001", "40P01", "55P03"];

/// Maps an sqlx error to the domain taxonomy: contention and constraint
/// violations become retriable `StorageConflict`, everything else is
/// `DatabaseError`.
pub(crate) fn map_db_err(context: &str, e: sqlx::Error) -> DomainError {
    if sqlstate_in(&e, &CONFLICT_SQLSTATES) {
        return DomainError::new(ErrorCode::StorageConflict, format!("{}: {}", context, e));
    }
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// True if the error carries one of the given SQLSTATE codes.
pub(crate) fn sqlstate_in(e: &sqlx::Error, codes: &[&str]) -> bool {
    if let sqlx::Error::Database(db) = e {
        if let Some(code) = db.code() {
            return codes.contains(&code.as_ref());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_map_to_database_error() {
        let err = map_db_err("fetch ride", sqlx::Error::RowNotFound);
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(err.message().contains("fetch ride"));
    }
}
