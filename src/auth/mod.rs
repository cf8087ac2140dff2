//! Session authentication for the admin surface.
//!
//! Passwords are hashed with Argon2id; sessions are stateless JWTs carried
//! as bearer tokens. The middleware verifies the token and stashes the
//! decoded claims in request extensions for handlers that want them.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, ErrorBody};
use crate::models::AdminIdentity;

/// JWT claims for an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Mint a session token for an admin, valid for `ttl_hours`.
pub fn mint_session(
    secret: &str,
    admin: &AdminIdentity,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: admin.id.clone(),
        email: admin.email.clone(),
        name: admin.name.clone(),
        role: admin.role.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
}

/// Decode and validate a session token. Expired or tampered tokens fail.
pub fn verify_session(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired session token".to_string()))
}

/// Session middleware for the admin routes. Takes the signing secret as a
/// parameter so the router can capture it in a closure.
pub async fn session_auth_layer(secret: String, mut request: Request, next: Next) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = bearer else {
        return unauthorized_response("Missing session token");
    };

    match verify_session(&secret, &token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(_) => unauthorized_response("Invalid or expired session token"),
    }
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
}
