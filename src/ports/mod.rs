//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Booking core
//!
//! - `BookingStore` / `BookingTx` - the atomic unit over inventory + ledger
//! - `RideInventory` - seat-inventory operations under the row lock
//! - `BookingLedger` - booking-row operations
//! - `PassengerDirectory` - identity snapshots for eligibility checks
//!
//! ## CRUD persistence and read models
//!
//! - `UserRepository`, `VehicleRepository`, `RideRepository`, `RideReader`
//!
//! ## Collaborators
//!
//! - `EventPublisher` / `EventSubscriber` - domain event transport
//! - `Mailer` - best-effort notification sink
//! - `SessionValidator` / `TokenIssuer` - access tokens
//! - `PasswordHasher` - credential hashing

mod booking_ledger;
mod booking_store;
mod event_publisher;
mod event_subscriber;
mod mailer;
mod passenger_directory;
mod password_hasher;
mod ride_inventory;
mod ride_reader;
mod ride_repository;
mod session_validator;
mod user_repository;
mod vehicle_repository;

pub use booking_ledger::BookingLedger;
pub use booking_store::{BookingStore, BookingTx};
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use mailer::{BookingNotice, Mailer};
pub use passenger_directory::PassengerDirectory;
pub use password_hasher::PasswordHasher;
pub use ride_inventory::RideInventory;
pub use ride_reader::{
    BookedRideSummary, ConfirmedPassenger, PublishedRideSummary, RideReader, RideSearchQuery,
    RideSearchResult,
};
pub use ride_repository::RideRepository;
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
