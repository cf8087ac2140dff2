//! Admin account model used by the authentication gate.

use serde::{Deserialize, Serialize};

/// A stored admin account. Deliberately not `Serialize`: the password hash
/// must never reach a response body.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: String,
}

impl AdminUser {
    /// The identity slice of the account, safe to serialize.
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// The minimal identity returned by login/setup/me endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Request body for the one-time initial setup endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for credential login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for successful login or setup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub admin: AdminIdentity,
    /// Seconds until the session token expires
    pub expires_in: i64,
}
