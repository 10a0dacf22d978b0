//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Gender, OneTimeCode, PhoneNumber, User};
use crate::ports::UserRepository;

use super::{map_db_err, sqlstate_in};

const USER_COLUMNS: &str = "user_id, username, email, password_hash, gender, phone_number, \
     is_email_verified, is_phone_verified, email_code, email_code_expires_at, \
     phone_code, phone_code_expires_at, created_at";

/// PostgreSQL implementation of `UserRepository`.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO users \
             (user_id, username, email, password_hash, gender, phone_number, \
              is_email_verified, is_phone_verified, email_code, email_code_expires_at, \
              phone_code, phone_code_expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.gender().as_str())
        .bind(user.phone().map(|p| p.as_str()))
        .bind(user.is_email_verified())
        .bind(user.is_phone_verified())
        .bind(user.email_code().map(|c| c.code()))
        .bind(user.email_code().map(|c| *c.expires_at().as_datetime()))
        .bind(user.phone_code().map(|c| c.code()))
        .bind(user.phone_code().map(|c| *c.expires_at().as_datetime()))
        .bind(user.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if sqlstate_in(&e, &["23505"]) {
                DomainError::new(
                    ErrorCode::EmailTaken,
                    "An account with this email already exists",
                )
            } else {
                map_db_err("insert user", e)
            }
        })?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET \
                username = $2, \
                gender = $3, \
                phone_number = $4, \
                is_email_verified = $5, \
                is_phone_verified = $6, \
                email_code = $7, \
                email_code_expires_at = $8, \
                phone_code = $9, \
                phone_code_expires_at = $10 \
             WHERE user_id = $1",
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.gender().as_str())
        .bind(user.phone().map(|p| p.as_str()))
        .bind(user.is_email_verified())
        .bind(user.is_phone_verified())
        .bind(user.email_code().map(|c| c.code()))
        .bind(user.email_code().map(|c| *c.expires_at().as_datetime()))
        .bind(user.phone_code().map(|c| c.code()))
        .bind(user.phone_code().map(|c| *c.expires_at().as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err("update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err("fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err("fetch user by email", e))?;

        row.map(row_to_user).transpose()
    }
}

fn code_from_columns(
    code: Option<String>,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
) -> Option<OneTimeCode> {
    match (code, expires_at) {
        (Some(code), Some(expires_at)) => Some(OneTimeCode::new(
            code,
            Timestamp::from_datetime(expires_at),
        )),
        _ => None,
    }
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let col_err = |e: sqlx::Error| map_db_err("read user row", e);

    let gender_str: String = row.try_get("gender").map_err(col_err)?;
    let gender = Gender::from_str(&gender_str)?;

    let phone = row
        .try_get::<Option<String>, _>("phone_number")
        .map_err(col_err)?
        .map(|p| PhoneNumber::parse(&p))
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Stored phone number is invalid: {}", e),
            )
        })?;

    let email_code = code_from_columns(
        row.try_get("email_code").map_err(col_err)?,
        row.try_get("email_code_expires_at").map_err(col_err)?,
    );
    let phone_code = code_from_columns(
        row.try_get("phone_code").map_err(col_err)?,
        row.try_get("phone_code_expires_at").map_err(col_err)?,
    );

    Ok(User::reconstitute(
        UserId::from_uuid(row.try_get("user_id").map_err(col_err)?),
        row.try_get("username").map_err(col_err)?,
        row.try_get("email").map_err(col_err)?,
        row.try_get("password_hash").map_err(col_err)?,
        gender,
        phone,
        row.try_get("is_email_verified").map_err(col_err)?,
        row.try_get("is_phone_verified").map_err(col_err)?,
        email_code,
        phone_code,
        Timestamp::from_datetime(row.try_get("created_at").map_err(col_err)?),
    ))
}
