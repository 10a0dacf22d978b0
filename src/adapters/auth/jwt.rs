//! JWT token service: issues and validates HS256 access tokens.
//!
//! The token carries only the user id (`sub`); everything else about the
//! caller is looked up per request. Implements both `TokenIssuer` (login)
//! and `SessionValidator` (middleware).

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

/// HS256 token service.
pub struct JwtTokenService {
    secret: SecretString,
    expiration_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: SecretString, expiration_secs: u64) -> Self {
        Self {
            secret,
            expiration_secs,
        }
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenService {
    async fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_datetime().timestamp() as u64,
            exp: now.plus_secs(self.expiration_secs as i64).as_datetime().timestamp() as u64,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.expiration_secs,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        let id = UserId::from_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id))
    }
}
