use actix_web::http::header;
use actix_web::{web, HttpResponse};
use actix_web::rt::task::spawn_blocking;
use bcrypt::{hash, verify};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::user::NewUser;
use crate::state::AppState;
use crate::utils::session::SessionUser;
use crate::utils::validation::{normalize_email, validate_name, validate_payload};

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 60, message = "Name must be between 1 and 60 characters"))]
    name: String,

    #[validate(email(message = "Invalid email format"))]
    email: String,

    #[validate(length(min = 8, max = 32, message = "Password must be between 8 and 32 characters"))]
    password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    // Not format-checked: any unknown email is just invalid credentials.
    email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    success: bool,
    message: &'static str,
}

impl MessageResponse {
    fn ok(message: &'static str) -> Self {
        Self { success: true, message }
    }
}

// POST /register
pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    validate_name(&req.name)?;

    let req = req.into_inner();
    let email = normalize_email(&req.email);

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let cost = state.bcrypt_cost;
    let password = req.password;
    let password_hash = spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|_| AppError::Internal("Hashing failed".to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // The unique index still decides if two registrations race past the lookup above.
    let user = state
        .store
        .create_user(NewUser {
            user_id: Uuid::now_v7(),
            name: req.name.trim().to_string(),
            email,
            password: password_hash,
        })
        .await?;

    info!("Registered user {}", user.user_id);
    Ok(HttpResponse::Created().json(MessageResponse::ok("Account created successfully")))
}

// POST /login
pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let req = req.into_inner();
    let email = normalize_email(&req.email);

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!("Login attempt for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let stored_hash = user.password.clone();
    let is_valid = spawn_blocking(move || verify(req.password, &stored_hash))
        .await
        .map_err(|_| AppError::Internal("Password verification error".to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !is_valid {
        warn!("Invalid password for user {}", user.user_id);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.issue(user.user_id, &user.name)?;

    Ok(HttpResponse::Ok()
        .cookie(state.sessions.cookie(token))
        .json(MessageResponse::ok("Login successful")))
}

// GET /logout
pub async fn logout(
    session: Option<SessionUser>,
    state: web::Data<AppState>,
) -> HttpResponse {
    if let Some(session) = session {
        state.sessions.revoke(&session.claims);
        info!("User {} logged out", session.user_id);
    }

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(state.sessions.removal_cookie())
        .finish()
}
