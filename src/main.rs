use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::info;
use vehicle_booking_api::application::auth_service::AuthService;
use vehicle_booking_api::application::booking_service::BookingService;
use vehicle_booking_api::application::profile_service::ProfileService;
use vehicle_booking_api::data::booking_repository::InMemoryBookingRepository;
use vehicle_booking_api::data::user_repository::InMemoryUserRepository;
use vehicle_booking_api::infrastructure::config::AppConfig;
use vehicle_booking_api::infrastructure::logging::init_logging;
use vehicle_booking_api::infrastructure::security::Argon2Verifier;
use vehicle_booking_api::presentation::auth::{login, register};
use vehicle_booking_api::presentation::handlers::{
    AppState, create_booking, get_profile, health_check, list_bookings, update_profile_image,
};
use vehicle_booking_api::presentation::middleware::{JwtAuthMiddleware, RequestTraceMiddleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    info!("Creating in-memory repositories");
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let booking_repository = Arc::new(InMemoryBookingRepository::new());

    info!("Creating services");
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        Arc::new(Argon2Verifier),
        config.jwt_secret.clone(),
    ));
    let profile_service = Arc::new(ProfileService::new(user_repository));
    let booking_service = Arc::new(BookingService::new(booking_repository));

    let state = web::Data::new(AppState {
        auth_service,
        profile_service,
        booking_service,
    });

    let jwt_secret = config.jwt_secret.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(RequestTraceMiddleware)
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .service(
                // Everything in this scope sits behind the authorization guard
                web::scope("")
                    .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
                    .route("/bookings", web::post().to(create_booking))
                    .route("/bookings/{userId}", web::get().to(list_bookings))
                    .route("/profile/image", web::post().to(update_profile_image))
                    .route("/profile", web::get().to(get_profile)),
            )
    });

    info!(address = %config.bind_addr, "Starting HTTP server");
    let server = server.bind(config.bind_addr.as_str())?;
    server.run().await?;
    Ok(())
}
