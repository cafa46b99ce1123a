use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Validates session tokens against the shared HS256 secret.
///
/// Expired and tampered tokens fail closed; the scope claim is returned to
/// the caller untouched so the authorization layer can pattern-match on it.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn with_hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 second clock skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Validate a token and return its claims.
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
