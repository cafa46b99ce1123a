//! Axum extractors for cookie-based session authentication

use crate::api::cookies::{PROVISIONAL_COOKIE, SESSION_COOKIE};
use crate::{ApiError, AppState};

use tf_auth::TokenScope;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use error_location::ErrorLocation;
use uuid::Uuid;

/// An authenticated caller carrying either token class.
///
/// Prefers the full session cookie and falls back to the provisional
/// one, so the OTP endpoints stay reachable mid-login. Handlers that
/// must not accept provisional tokens use [`FullSession`] instead.
pub struct Session {
    pub account_id: Uuid,
    pub scope: TokenScope,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let jar = CookieJar::from_headers(&parts.headers);

            let token = jar
                .get(SESSION_COOKIE)
                .or_else(|| jar.get(PROVISIONAL_COOKIE))
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| ApiError::Unauthenticated {
                    message: "Please login first".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let claims = state.jwt_validator.validate(&token).map_err(|e| {
                log::debug!("Session token rejected: {}", e);
                ApiError::Unauthenticated {
                    message: "Authentication failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let account_id = claims.account_id().map_err(|e| {
                log::debug!("Session token subject rejected: {}", e);
                ApiError::Unauthenticated {
                    message: "Authentication failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            Ok(Session {
                account_id,
                scope: claims.scope,
            })
        }
    }
}

/// An authenticated caller holding a full session token.
///
/// Provisional tokens are rejected: a password check alone does not
/// grant access to authenticated endpoints.
pub struct FullSession(pub Uuid);

impl FromRequestParts<AppState> for FullSession {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let session = Session::from_request_parts(parts, state).await?;

            match session.scope {
                TokenScope::Full => Ok(FullSession(session.account_id)),
                TokenScope::Provisional => Err(ApiError::Unauthenticated {
                    message: "Please verify your login first".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }),
            }
        }
    }
}
