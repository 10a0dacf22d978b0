//! Command and query handlers, one per operation.

pub mod auth;
pub mod booking;
pub mod ride;
pub mod user;
pub mod vehicle;
