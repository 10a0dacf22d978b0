use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rideshare::adapters::auth::{BcryptPasswordHasher, JwtTokenService};
use rideshare::adapters::email::{ConsoleMailer, SmtpMailer};
use rideshare::adapters::events::InMemoryEventBus;
use rideshare::adapters::http::{
    app, AppRouters, AuthHandlers, BookingHandlers, ProfileHandlers, RideHandlers, VehicleHandlers,
};
use rideshare::adapters::notifications::BookingEmailNotifier;
use rideshare::adapters::postgres::{
    connect_pool, run_migrations, PostgresBookingStore, PostgresPassengerDirectory,
    PostgresRideReader, PostgresRideRepository, PostgresUserRepository, PostgresVehicleRepository,
};
use rideshare::application::handlers::auth::{
    LogInHandler, SendPhoneCodeHandler, SignUpHandler, VerifyEmailHandler, VerifyPhoneCodeHandler,
};
use rideshare::application::handlers::booking::{ReleaseSeatHandler, ReserveSeatHandler};
use rideshare::application::handlers::ride::{
    CancelRideHandler, ListBookedRidesHandler, ListPublishedRidesHandler, PublishRideHandler,
    SearchRidesHandler,
};
use rideshare::application::handlers::user::{GetProfileHandler, UpdateProfileHandler};
use rideshare::application::handlers::vehicle::{
    DeleteVehicleHandler, ListVehiclesHandler, RegisterVehicleHandler,
};
use rideshare::config::{AppConfig, EmailDelivery};
use rideshare::ports::{EventSubscriber, Mailer, SessionValidator, TokenIssuer};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rideshare=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    let pool = connect_pool(&config.database)
        .await
        .expect("Failed to connect to PostgreSQL");
    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
    }

    // Storage adapters
    let booking_store = Arc::new(PostgresBookingStore::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let vehicles = Arc::new(PostgresVehicleRepository::new(pool.clone()));
    let rides = Arc::new(PostgresRideRepository::new(pool.clone()));
    let ride_reader = Arc::new(PostgresRideReader::new(pool.clone()));
    let directory = Arc::new(PostgresPassengerDirectory::new(pool));

    // Collaborators
    let mailer: Arc<dyn Mailer> = match config.email.delivery {
        EmailDelivery::Smtp => {
            Arc::new(SmtpMailer::new(&config.email).expect("Failed to build SMTP mailer"))
        }
        EmailDelivery::Console => Arc::new(ConsoleMailer::new()),
    };

    let event_bus = Arc::new(InMemoryEventBus::new());
    event_bus.subscribe(
        "booking.confirmed",
        Arc::new(BookingEmailNotifier::new(mailer.clone())),
    );

    let token_service = Arc::new(JwtTokenService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_secs,
    ));
    let validator: Arc<dyn SessionValidator> = token_service.clone();
    let issuer: Arc<dyn TokenIssuer> = token_service;
    let hasher = Arc::new(BcryptPasswordHasher::new());

    // Command/query handlers
    let routers = AppRouters {
        auth: AuthHandlers::new(
            Arc::new(SignUpHandler::new(
                users.clone(),
                hasher.clone(),
                mailer.clone(),
            )),
            Arc::new(VerifyEmailHandler::new(users.clone())),
            Arc::new(LogInHandler::new(users.clone(), hasher, issuer)),
        ),
        profile: ProfileHandlers::new(
            Arc::new(GetProfileHandler::new(users.clone())),
            Arc::new(UpdateProfileHandler::new(users.clone())),
            Arc::new(SendPhoneCodeHandler::new(users.clone())),
            Arc::new(VerifyPhoneCodeHandler::new(users)),
        ),
        vehicles: VehicleHandlers::new(
            Arc::new(RegisterVehicleHandler::new(vehicles.clone())),
            Arc::new(ListVehiclesHandler::new(vehicles.clone())),
            Arc::new(DeleteVehicleHandler::new(booking_store.clone())),
        ),
        rides: RideHandlers::new(
            Arc::new(PublishRideHandler::new(rides, vehicles)),
            Arc::new(CancelRideHandler::new(
                booking_store.clone(),
                event_bus.clone(),
            )),
            Arc::new(SearchRidesHandler::new(ride_reader.clone())),
            Arc::new(ListPublishedRidesHandler::new(ride_reader.clone())),
            Arc::new(ListBookedRidesHandler::new(ride_reader)),
        ),
        bookings: BookingHandlers::new(
            Arc::new(ReserveSeatHandler::new(
                booking_store.clone(),
                directory,
                event_bus.clone(),
            )),
            Arc::new(ReleaseSeatHandler::new(booking_store, event_bus)),
        ),
        validator,
    };

    let app = app(routers);

    let addr = config.server.socket_addr();
    tracing::info!("RideShare API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
