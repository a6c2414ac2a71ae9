use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::AuthUser;
use crate::db;
use crate::models::user::ProfileDraft;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, AppError> {
    let profile = db::users::find(&state.db, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("No profile exists for this account.".to_string()))?;
    Ok(success(profile, "Profile fetched").into_response())
}

pub async fn upsert_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<ProfileDraft>,
) -> Result<Response, AppError> {
    if draft.name.trim().is_empty() {
        return Err(AppError::ValidationError("Name must not be empty.".to_string()));
    }
    if draft.email.trim().is_empty() {
        return Err(AppError::ValidationError("Email must not be empty.".to_string()));
    }

    let profile = db::users::upsert(&state.db, user.0, draft).await?;
    Ok(success(profile, "Profile saved").into_response())
}
