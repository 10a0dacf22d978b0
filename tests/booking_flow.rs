//! End-to-end booking flows over the in-memory storage adapters.
//!
//! These tests wire the real coordinators, the in-memory unit of work,
//! the event bus, and the email notifier together, and check the seat
//! accounting invariants the storage layer must uphold.

use std::sync::Arc;

use async_trait::async_trait;

use rideshare::adapters::events::InMemoryEventBus;
use rideshare::adapters::memory::{InMemoryBookingStore, InMemoryPassengerDirectory};
use rideshare::adapters::notifications::BookingEmailNotifier;
use rideshare::application::handlers::booking::{
    ReleaseSeatCommand, ReleaseSeatHandler, ReserveSeatCommand, ReserveSeatHandler,
    ReserveSeatResult,
};
use rideshare::application::handlers::ride::{CancelRideCommand, CancelRideHandler};
use rideshare::domain::booking::BookingStatus;
use rideshare::domain::foundation::{
    BookingId, DomainError, ErrorCode, RideId, Timestamp, UserId, VehicleId,
};
use rideshare::domain::ride::{Ride, RideStatus};
use rideshare::domain::user::{Gender, PassengerSnapshot};
use rideshare::ports::{BookingNotice, EventSubscriber, Mailer};

struct TestApp {
    store: Arc<InMemoryBookingStore>,
    directory: Arc<InMemoryPassengerDirectory>,
    bus: Arc<InMemoryEventBus>,
    reserve: ReserveSeatHandler,
    release: ReleaseSeatHandler,
    cancel_ride: CancelRideHandler,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryBookingStore::new());
        let directory = Arc::new(InMemoryPassengerDirectory::new());
        let bus = Arc::new(InMemoryEventBus::new());
        Self {
            reserve: ReserveSeatHandler::new(store.clone(), directory.clone(), bus.clone()),
            release: ReleaseSeatHandler::new(store.clone(), bus.clone()),
            cancel_ride: CancelRideHandler::new(store.clone(), bus.clone()),
            store,
            directory,
            bus,
        }
    }

    fn add_passenger(&self, gender: Gender) -> UserId {
        let id = UserId::new();
        self.directory.insert(PassengerSnapshot {
            id,
            display_name: format!("user-{id}"),
            gender,
            email: format!("{id}@example.com"),
        });
        id
    }

    async fn add_ride(&self, driver: UserId, seats: u32) -> RideId {
        let ride = Ride::publish(
            RideId::new(),
            driver,
            VehicleId::new(),
            "Pune".to_string(),
            "Mumbai".to_string(),
            Timestamp::now().plus_hours(6),
            seats,
            25_000,
            false,
        )
        .unwrap();
        let id = *ride.id();
        self.store.seed_ride(ride).await;
        id
    }

    async fn reserve(
        &self,
        ride_id: RideId,
        passenger_id: UserId,
    ) -> Result<ReserveSeatResult, DomainError> {
        self.reserve
            .handle(ReserveSeatCommand {
                ride_id,
                passenger_id,
            })
            .await
    }

    async fn release(&self, booking_id: BookingId, passenger_id: UserId) -> Result<(), DomainError> {
        self.release
            .handle(ReleaseSeatCommand {
                booking_id,
                passenger_id,
            })
            .await
            .map(|_| ())
    }

    async fn available(&self, ride_id: &RideId) -> u32 {
        self.store.ride(ride_id).await.unwrap().available_seats()
    }
}

#[tokio::test]
async fn capacity_two_scenario_walkthrough() {
    let app = TestApp::new();
    let driver = app.add_passenger(Gender::Male);
    let a = app.add_passenger(Gender::Female);
    let b = app.add_passenger(Gender::Male);
    let c = app.add_passenger(Gender::Other);
    let ride = app.add_ride(driver, 2).await;

    // A reserves: 2 -> 1
    let booking_a = app.reserve(ride, a).await.unwrap().booking;
    assert_eq!(app.available(&ride).await, 1);

    // A again: AlreadyBooked, count untouched
    let err = app.reserve(ride, a).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyBooked);
    assert_eq!(app.available(&ride).await, 1);

    // B reserves: 1 -> 0
    app.reserve(ride, b).await.unwrap();
    assert_eq!(app.available(&ride).await, 0);

    // C: RideFull
    let err = app.reserve(ride, c).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RideFull);

    // A releases: 0 -> 1
    app.release(*booking_a.id(), a).await.unwrap();
    assert_eq!(app.available(&ride).await, 1);

    // C reserves: 1 -> 0
    app.reserve(ride, c).await.unwrap();
    assert_eq!(app.available(&ride).await, 0);

    assert!(app.store.conservation_holds(&ride).await);
    // A, B, C: one row each, ever.
    assert_eq!(app.store.booking_count().await, 3);
}

#[tokio::test]
async fn concurrent_reserves_on_last_seat_never_oversell() {
    let app = TestApp::new();
    let driver = app.add_passenger(Gender::Male);
    let ride = app.add_ride(driver, 1).await;
    let passengers: Vec<UserId> = (0..10).map(|_| app.add_passenger(Gender::Female)).collect();

    let handler = Arc::new(ReserveSeatHandler::new(
        app.store.clone(),
        app.directory.clone(),
        app.bus.clone(),
    ));

    let mut handles = Vec::new();
    for passenger_id in passengers {
        let handler = handler.clone();
        handles.push(tokio::spawn(async move {
            handler
                .handle(ReserveSeatCommand {
                    ride_id: ride,
                    passenger_id,
                })
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.code(), ErrorCode::RideFull),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(app.available(&ride).await, 0);
    assert!(app.store.conservation_holds(&ride).await);
}

#[tokio::test]
async fn reserve_release_reserve_reuses_the_row() {
    let app = TestApp::new();
    let driver = app.add_passenger(Gender::Male);
    let passenger = app.add_passenger(Gender::Female);
    let ride = app.add_ride(driver, 3).await;

    let first = app.reserve(ride, passenger).await.unwrap().booking;
    assert_eq!(app.available(&ride).await, 2);

    app.release(*first.id(), passenger).await.unwrap();
    assert_eq!(app.available(&ride).await, 3);

    let second = app.reserve(ride, passenger).await.unwrap().booking;

    // Same ledger row, reactivated; seats decremented exactly once.
    assert_eq!(second.id(), first.id());
    assert_eq!(second.status(), BookingStatus::Confirmed);
    assert_eq!(app.available(&ride).await, 2);
    assert_eq!(app.store.booking_count().await, 1);
    assert!(app.store.conservation_holds(&ride).await);
}

#[tokio::test]
async fn double_release_fails_without_touching_seats() {
    let app = TestApp::new();
    let driver = app.add_passenger(Gender::Male);
    let passenger = app.add_passenger(Gender::Female);
    let ride = app.add_ride(driver, 2).await;

    let booking = app.reserve(ride, passenger).await.unwrap().booking;
    app.release(*booking.id(), passenger).await.unwrap();
    assert_eq!(app.available(&ride).await, 2);

    let err = app.release(*booking.id(), passenger).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(app.available(&ride).await, 2);
}

#[tokio::test]
async fn ride_cancellation_cascades_and_blocks_new_reserves() {
    let app = TestApp::new();
    let driver = app.add_passenger(Gender::Male);
    let ride = app.add_ride(driver, 4).await;

    let mut passengers = Vec::new();
    for _ in 0..3 {
        let p = app.add_passenger(Gender::Female);
        app.reserve(ride, p).await.unwrap();
        passengers.push(p);
    }
    assert_eq!(app.available(&ride).await, 1);

    let result = app
        .cancel_ride
        .handle(CancelRideCommand {
            ride_id: ride,
            driver_id: driver,
        })
        .await
        .unwrap();
    assert_eq!(result.bookings_cancelled, 3);

    let stored = app.store.ride(&ride).await.unwrap();
    assert_eq!(stored.status(), RideStatus::Cancelled);
    // Seats are not reconciled on cascade; the ride leaves the pool whole.
    assert_eq!(stored.available_seats(), 1);

    for booking in app.store.bookings_for_ride(&ride).await {
        assert_eq!(booking.status(), BookingStatus::Cancelled);
    }

    // No further reserves on a cancelled ride.
    let late = app.add_passenger(Gender::Female);
    let err = app.reserve(ride, late).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RideNotScheduled);
}

struct BrokenMailer;

#[async_trait]
impl Mailer for BrokenMailer {
    async fn send_verification_code(
        &self,
        _to: &str,
        _username: &str,
        _code: &str,
        _expires_at: Timestamp,
    ) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::InternalError, "smtp down"))
    }

    async fn send_booking_notice(&self, _notice: &BookingNotice) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::InternalError, "smtp down"))
    }
}

#[tokio::test]
async fn failed_driver_email_never_reverses_a_committed_booking() {
    let app = TestApp::new();
    app.bus.subscribe(
        "booking.confirmed",
        Arc::new(BookingEmailNotifier::new(Arc::new(BrokenMailer))),
    );

    let driver = app.add_passenger(Gender::Male);
    let passenger = app.add_passenger(Gender::Female);
    let ride = app.add_ride(driver, 2).await;

    let result = app.reserve(ride, passenger).await;

    assert!(result.is_ok());
    assert_eq!(app.available(&ride).await, 1);
    let booking = app.store.booking_for(&ride, &passenger).await.unwrap();
    assert_eq!(booking.status(), BookingStatus::Confirmed);
    // The event was still published; only delivery failed.
    assert!(app.bus.has_event("booking.confirmed"));
}
