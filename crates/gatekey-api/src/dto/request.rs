//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register/login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
