//! RideShare - Ride-Sharing Marketplace Backend
//!
//! This crate implements a ride-sharing marketplace with a transactional
//! seat-booking core: publish rides, search them, and reserve or release
//! seats without ever overselling a ride.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
