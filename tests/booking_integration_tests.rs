use actix_web::{App, test, web};
use std::sync::Arc;
use vehicle_booking_api::application::auth_service::AuthService;
use vehicle_booking_api::application::booking_service::BookingService;
use vehicle_booking_api::application::profile_service::ProfileService;
use vehicle_booking_api::data::booking_repository::InMemoryBookingRepository;
use vehicle_booking_api::data::user_repository::InMemoryUserRepository;
use vehicle_booking_api::domain::user::{LoginRequest, RegisterRequest};
use vehicle_booking_api::infrastructure::security::Argon2Verifier;
use vehicle_booking_api::presentation::handlers::{AppState, create_booking, list_bookings};
use vehicle_booking_api::presentation::middleware::JwtAuthMiddleware;

const TEST_SECRET: &str = "test-secret-key-for-booking-tests";

// Builds the protected app and returns it with a token for user "u1".
macro_rules! setup_booking_test {
    () => {{
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let booking_repository = Arc::new(InMemoryBookingRepository::new());

        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            Arc::new(Argon2Verifier),
            TEST_SECRET.to_string(),
        ));

        auth_service
            .register(RegisterRequest {
                user_id: "u1".to_string(),
                email: "u1@example.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();
        let token = auth_service
            .login(LoginRequest {
                user_id: "u1".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap()
            .token;

        let profile_service = Arc::new(ProfileService::new(user_repository));
        let booking_service = Arc::new(BookingService::new(booking_repository));

        let state = web::Data::new(AppState {
            auth_service,
            profile_service,
            booking_service,
        });

        let app = test::init_service(
            App::new().app_data(state.clone()).service(
                web::scope("")
                    .wrap(JwtAuthMiddleware::new(TEST_SECRET.to_string()))
                    .route("/bookings", web::post().to(create_booking))
                    .route("/bookings/{userId}", web::get().to(list_bookings)),
            ),
        )
        .await;

        (app, token)
    }};
}

#[actix_web::test]
async fn test_create_booking_stamps_authenticated_owner() {
    let (app, token) = setup_booking_test!();

    // The body claims another owner; the stamp must win
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({
            "vehicleId": "v1",
            "userId": "attacker",
            "fromDate": "2026-09-01",
            "toDate": "2026-09-02",
            "totalPrice": "120",
            "status": "confirmed"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["success"], true);
    assert_eq!(resp["booking"]["userId"], "u1");
    assert_eq!(resp["booking"]["vehicleId"], "v1");
    assert!(resp["booking"]["id"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(resp["booking"]["bookingDate"].as_str().is_some());
}

#[actix_web::test]
async fn test_list_own_bookings_returns_created_records() {
    let (app, token) = setup_booking_test!();

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri("/bookings")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({ "vehicleId": format!("v{}", i) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/bookings/u1")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["success"], true);
    let bookings = resp["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 3);
    assert!(bookings.iter().all(|b| b["userId"] == "u1"));
}

#[actix_web::test]
async fn test_list_another_users_bookings_is_forbidden() {
    let (app, token) = setup_booking_test!();

    let req = test::TestRequest::get()
        .uri("/bookings/u2")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], "Unauthorized access");
    assert!(resp.get("bookings").is_none());
}

#[actix_web::test]
async fn test_create_booking_without_token_is_unauthenticated() {
    let (app, _token) = setup_booking_test!();

    let req = test::TestRequest::post()
        .uri("/bookings")
        .set_json(serde_json::json!({ "vehicleId": "v1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["success"], false);
    assert_eq!(resp["message"], "No token provided");
}

#[actix_web::test]
async fn test_tampered_token_is_forbidden() {
    let (app, token) = setup_booking_test!();

    // Flip the payload segment of a real token
    let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
    parts[1] = "eyJzdWIiOiJhdHRhY2tlciJ9".to_string();
    let tampered = parts.join(".");

    let req = test::TestRequest::get()
        .uri("/bookings/u1")
        .insert_header(("Authorization", format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["message"], "Invalid token");
}

#[actix_web::test]
async fn test_token_signed_with_wrong_secret_is_forbidden() {
    let (app, _token) = setup_booking_test!();

    let forged =
        vehicle_booking_api::infrastructure::security::issue_token("u1", "some-other-secret")
            .unwrap();

    let req = test::TestRequest::get()
        .uri("/bookings/u1")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_create_booking_with_minimal_body() {
    let (app, token) = setup_booking_test!();

    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let resp: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(resp["booking"]["userId"], "u1");
    assert!(resp["booking"]["vehicleId"].is_null());
}
