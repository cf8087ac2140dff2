//! Admin authentication endpoints: first-run setup, login, session check.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::auth::{self, Claims};
use crate::errors::AppError;
use crate::models::{AdminIdentity, LoginRequest, SessionResponse, SetupRequest};
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /api/auth/setup - Create the first admin account and log in.
/// Rejected once any admin exists; after that, accounts are managed out
/// of band.
pub async fn setup(
    State(state): State<AppState>,
    Json(request): Json<SetupRequest>,
) -> ApiResult<SessionResponse> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation(
            "A valid email is required".to_string(),
        ));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if state.repo.count_admins().await? > 0 {
        return Err(AppError::Validation(
            "Setup has already been completed".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let admin = state
        .repo
        .create_admin(request.email.trim(), request.name.trim(), &password_hash)
        .await?;

    let session = issue_session(&state, admin.identity())?;
    success("Admin account created successfully", session)
}

/// POST /api/auth/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionResponse> {
    let admin = state
        .repo
        .get_admin_by_email(request.email.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized("No such user".to_string()))?;

    if !auth::verify_password(&request.password, &admin.password_hash)? {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let session = issue_session(&state, admin.identity())?;
    success("Logged in successfully", session)
}

/// GET /api/admin/auth/me - Return the identity behind the session token.
/// The session middleware has already verified the token and stashed the
/// claims.
pub async fn me(Extension(claims): Extension<Claims>) -> ApiResult<AdminIdentity> {
    success("Session is valid", claims.identity())
}

fn issue_session(state: &AppState, admin: AdminIdentity) -> Result<SessionResponse, AppError> {
    let ttl_hours = state.config.session_ttl_hours;
    let token = auth::mint_session(&state.config.session_secret, &admin, ttl_hours)?;

    Ok(SessionResponse {
        token,
        admin,
        expires_in: ttl_hours * 3600,
    })
}
