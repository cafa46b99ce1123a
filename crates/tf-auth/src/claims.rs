use crate::{AuthError, Result as AuthErrorResult, TokenScope};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for both session token classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    /// Token class: provisional (OTP pending) or full (authenticated)
    pub scope: TokenScope,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Build claims for `account_id` with the lifetime of `scope`.
    pub fn new(account_id: Uuid, scope: TokenScope) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            scope,
            exp: (now + scope.lifetime()).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (account id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Parse the subject back into an account id.
    #[track_caller]
    pub fn account_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("sub is not a valid account id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
