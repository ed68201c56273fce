//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Register response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Access token for the new account.
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

/// Login and refresh response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// Fresh access token.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
