use crate::{AuthError, Claims, Result as AuthErrorResult, TokenScope};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

/// Mints signed session tokens (HS256, shared secret with the validator).
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `account_id` with the lifetime of `scope`.
    #[track_caller]
    pub fn issue(&self, account_id: Uuid, scope: TokenScope) -> AuthErrorResult<String> {
        let claims = Claims::new(account_id, scope);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
