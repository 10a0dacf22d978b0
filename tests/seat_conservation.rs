//! Property test: no interleaving of reserve/release calls can break the
//! seat conservation law or the one-row-per-(ride, passenger) invariant.

use std::sync::Arc;

use proptest::prelude::*;

use rideshare::adapters::events::InMemoryEventBus;
use rideshare::adapters::memory::{InMemoryBookingStore, InMemoryPassengerDirectory};
use rideshare::application::handlers::booking::{
    ReleaseSeatCommand, ReleaseSeatHandler, ReserveSeatCommand, ReserveSeatHandler,
};
use rideshare::domain::foundation::{ErrorCode, RideId, Timestamp, UserId, VehicleId};
use rideshare::domain::ride::Ride;
use rideshare::domain::user::{Gender, PassengerSnapshot};

/// One step of the generated schedule, applied to a passenger index.
#[derive(Debug, Clone, Copy)]
enum Op {
    Reserve(usize),
    Release(usize),
}

fn op_strategy(passenger_count: usize) -> impl Strategy<Value = Op> {
    (0..2u8, 0..passenger_count).prop_map(|(kind, idx)| {
        if kind == 0 {
            Op::Reserve(idx)
        } else {
            Op::Release(idx)
        }
    })
}

async fn run_schedule(capacity: u32, ops: Vec<Op>) {
    let store = Arc::new(InMemoryBookingStore::new());
    let directory = Arc::new(InMemoryPassengerDirectory::new());
    let bus = Arc::new(InMemoryEventBus::new());

    let driver = UserId::new();
    directory.insert(PassengerSnapshot {
        id: driver,
        display_name: "driver".to_string(),
        gender: Gender::Male,
        email: "driver@example.com".to_string(),
    });

    let passengers: Vec<UserId> = (0..4)
        .map(|i| {
            let id = UserId::new();
            directory.insert(PassengerSnapshot {
                id,
                display_name: format!("p{i}"),
                gender: Gender::Female,
                email: format!("p{i}@example.com"),
            });
            id
        })
        .collect();

    let ride = Ride::publish(
        RideId::new(),
        driver,
        VehicleId::new(),
        "Pune".to_string(),
        "Mumbai".to_string(),
        Timestamp::now().plus_hours(6),
        capacity,
        10_000,
        false,
    )
    .unwrap();
    let ride_id = *ride.id();
    store.seed_ride(ride).await;

    let reserve = ReserveSeatHandler::new(store.clone(), directory.clone(), bus.clone());
    let release = ReleaseSeatHandler::new(store.clone(), bus);

    for op in ops {
        match op {
            Op::Reserve(idx) => {
                let result = reserve
                    .handle(ReserveSeatCommand {
                        ride_id,
                        passenger_id: passengers[idx],
                    })
                    .await;
                if let Err(e) = result {
                    // The only legitimate rejections in this schedule.
                    assert!(
                        matches!(e.code(), ErrorCode::RideFull | ErrorCode::AlreadyBooked),
                        "unexpected reserve error: {e}"
                    );
                }
            }
            Op::Release(idx) => {
                let booking = store.booking_for(&ride_id, &passengers[idx]).await;
                if let Some(booking) = booking {
                    let result = release
                        .handle(ReleaseSeatCommand {
                            booking_id: *booking.id(),
                            passenger_id: passengers[idx],
                        })
                        .await;
                    if let Err(e) = result {
                        // Only a booking that is no longer confirmed.
                        assert_eq!(e.code(), ErrorCode::NotFound, "unexpected release error");
                    }
                }
            }
        }

        // The conservation law must hold after every committed operation.
        assert!(
            store.conservation_holds(&ride_id).await,
            "conservation violated after {op:?}"
        );
    }

    // One ledger row per passenger, ever, regardless of rebook cycles.
    assert!(store.booking_count().await <= passengers.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_reserve_release_schedule_conserves_seats(
        capacity in 1u32..4,
        ops in prop::collection::vec(op_strategy(4), 1..40),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        rt.block_on(run_schedule(capacity, ops));
    }
}
