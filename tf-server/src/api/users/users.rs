//! User REST API handlers

use crate::{ApiError, ApiResult, AppState, FullSession, UserDataResponse};

use tf_core::AccountView;
use tf_db::AccountRepository;

use std::panic::Location;

use axum::{Json, extract::State};
use error_location::ErrorLocation;

/// GET /api/user/data
///
/// Public view of the caller's account. Never exposes the password
/// hash or OTP fields.
pub async fn get_user_data(
    State(state): State<AppState>,
    session: FullSession,
) -> ApiResult<Json<UserDataResponse>> {
    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(session.0)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated {
            message: "User not found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(UserDataResponse::new(AccountView::from(&account))))
}
