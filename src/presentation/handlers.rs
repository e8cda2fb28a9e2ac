use crate::application::auth_service::AuthService;
use crate::application::booking_service::BookingService;
use crate::application::profile_service::ProfileService;
use crate::data::booking_repository::InMemoryBookingRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::booking::{Booking, CreateBooking};
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::presentation::middleware::AuthenticatedUser;
use actix_multipart::Multipart;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError, web};
use chrono::Utc;
use futures_util::TryStreamExt;
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub profile_service: Arc<ProfileService<InMemoryUserRepository>>,
    pub booking_service: Arc<BookingService<InMemoryBookingRepository>>,
}

// Uniform error response format: { success: false, message }
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

// API Error Types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::Unauthenticated(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => actix_web::http::StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Internal(_) => {
                error!(error = %message, status = %status, "Internal error")
            }
            ApiError::Forbidden(_) => {
                warn!(error = %message, status = %status, "Forbidden")
            }
            ApiError::Unauthenticated(_) => {
                warn!(error = %message, status = %status, "Unauthenticated")
            }
            _ => warn!(error = %message, status = %status, "Client error"),
        }

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            message,
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::DuplicateUser) => {
                ApiError::Conflict(DomainError::DuplicateUser.to_string())
            }
            Some(DomainError::UserNotFound) => {
                ApiError::NotFound(DomainError::UserNotFound.to_string())
            }
            Some(DomainError::InvalidCredential) => {
                ApiError::InvalidCredential(DomainError::InvalidCredential.to_string())
            }
            Some(DomainError::Forbidden) => ApiError::Forbidden(DomainError::Forbidden.to_string()),
            // Store or encoding failures stay generic towards the client
            Some(DomainError::Internal(_)) | None => {
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

// AuthenticatedUser extractor; the guard middleware populates the extension
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthenticated("No token provided".to_string()))
        })
    }
}

// Handlers

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    success: bool,
    user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileImageResponse {
    success: bool,
    message: String,
    profile_image: String,
}

#[derive(Serialize)]
struct BookingResponse {
    success: bool,
    booking: Booking,
}

#[derive(Serialize)]
struct BookingListResponse {
    success: bool,
    bookings: Vec<Booking>,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    info!(user_id = %auth.user_id, "Fetching profile");
    let user = state
        .profile_service
        .get_profile(&auth.user_id)
        .await
        .map_err(|e| {
            error!(user_id = %auth.user_id, error = %e, "Failed to fetch profile");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user,
    }))
}

#[instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn update_profile_image(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    info!(user_id = %auth.user_id, "Profile image upload received");

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(mut field) = payload.try_next().await.map_err(|e| {
        error!(error = %e, "Failed to read multipart payload");
        ApiError::Internal("Internal server error".to_string())
    })? {
        let is_image = field.name() == "image";
        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        // Every field has to be drained before advancing the stream
        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| {
            error!(error = %e, "Failed to read upload body");
            ApiError::Internal("Internal server error".to_string())
        })? {
            if is_image {
                data.extend_from_slice(&chunk);
            }
        }
        if is_image {
            upload = Some((content_type, data));
        }
    }

    let (content_type, data) =
        upload.ok_or_else(|| ApiError::Validation("image file is required".to_string()))?;

    let profile_image = state
        .profile_service
        .update_profile_image(&auth.user_id, &content_type, &data)
        .await
        .map_err(|e| {
            error!(user_id = %auth.user_id, error = %e, "Failed to update profile image");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(ProfileImageResponse {
        success: true,
        message: "Profile image updated".to_string(),
        profile_image,
    }))
}

#[instrument(skip(state, auth, req), fields(user_id = %auth.user_id))]
pub async fn create_booking(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    req: web::Json<CreateBooking>,
) -> Result<HttpResponse, ApiError> {
    info!(user_id = %auth.user_id, "Booking request received");
    let booking = state
        .booking_service
        .create_booking(&auth.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(user_id = %auth.user_id, error = %e, "Failed to create booking");
            ApiError::from(e)
        })?;

    info!(booking_id = %booking.id, "Booking created successfully");
    Ok(HttpResponse::Ok().json(BookingResponse {
        success: true,
        booking,
    }))
}

#[instrument(skip(state, auth), fields(user_id = %auth.user_id, target_user_id = %*path))]
pub async fn list_bookings(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let target_user_id = path.into_inner();
    info!(target_user_id = %target_user_id, "Fetching bookings");

    let bookings = state
        .booking_service
        .list_bookings(&auth.user_id, &target_user_id)
        .await
        .map_err(|e| {
            warn!(
                user_id = %auth.user_id,
                target_user_id = %target_user_id,
                error = %e,
                "Failed to list bookings"
            );
            ApiError::from(e)
        })?;

    info!(count = bookings.len(), "Bookings fetched successfully");
    Ok(HttpResponse::Ok().json(BookingListResponse {
        success: true,
        bookings,
    }))
}
