use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub name: String,
    pub profile_image: Option<String>,
}

#[instrument(skip(state, req), fields(user_id = %req.user_id, email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(user_id = %req.user_id, "Registration request received");

    state
        .auth_service
        .register(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(RegisterResponse {
        success: true,
        message: "User registered successfully".to_string(),
    }))
}

#[instrument(skip(state, req), fields(user_id = %req.user_id))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(user_id = %req.user_id, "Login request received");

    let outcome = state.auth_service.login(req.into_inner()).await.map_err(|e| {
        error!(error = %e, "Failed to login");
        ApiError::from(e)
    })?;

    info!("Login successful");
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token: outcome.token,
        name: outcome.name,
        profile_image: outcome.profile_image,
    }))
}
