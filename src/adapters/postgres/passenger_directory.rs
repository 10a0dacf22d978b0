//! PostgreSQL implementation of PassengerDirectory.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Gender, PassengerSnapshot};
use crate::ports::PassengerDirectory;

use super::map_db_err;

/// PostgreSQL implementation of `PassengerDirectory`.
#[derive(Clone)]
pub struct PostgresPassengerDirectory {
    pool: PgPool,
}

impl PostgresPassengerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassengerDirectory for PostgresPassengerDirectory {
    async fn find_snapshot(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PassengerSnapshot>, DomainError> {
        let row = sqlx::query("SELECT user_id, username, gender, email FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err("fetch passenger snapshot", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let col_err = |e: sqlx::Error| map_db_err("read snapshot row", e);
        let gender_str: String = row.try_get("gender").map_err(col_err)?;

        Ok(Some(PassengerSnapshot {
            id: UserId::from_uuid(row.try_get("user_id").map_err(col_err)?),
            display_name: row.try_get("username").map_err(col_err)?,
            gender: Gender::from_str(&gender_str)?,
            email: row.try_get("email").map_err(col_err)?,
        }))
    }
}
