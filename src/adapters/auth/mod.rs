//! Auth adapters: JWT tokens, bcrypt hashing, and test mocks.

mod bcrypt;
mod jwt;
mod mock;

pub use self::bcrypt::BcryptPasswordHasher;
pub use jwt::JwtTokenService;
pub use mock::{MockSessionValidator, PlainTextHasher};
