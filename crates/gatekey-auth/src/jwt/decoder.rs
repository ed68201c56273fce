//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use gatekey_core::config::auth::AuthConfig;
use gatekey_core::error::AppError;

use super::claims::{CLAIMS_VERSION, Claims};

/// Validates JWT tokens.
///
/// Exactly one algorithm (HS256) is accepted; tokens signed with any
/// other algorithm, including "none", fail with a signature error.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks:
    /// 1. Structural validity
    /// 2. Signature and signing algorithm
    /// 3. Expiration
    /// 4. Claims record version
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let message = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired",
                    jsonwebtoken::errors::ErrorKind::InvalidToken => "Invalid token format",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "Invalid token signature",
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        "Token signed with an unsupported algorithm"
                    }
                    _ => "Token validation failed",
                };
                AppError::authentication(message).in_operation("TokenDecoder.verify")
            })?;

        let claims = token_data.claims;
        if claims.ver != CLAIMS_VERSION {
            return Err(
                AppError::authentication("Unsupported claims version")
                    .in_operation("TokenDecoder.verify"),
            );
        }

        Ok(claims)
    }
}
