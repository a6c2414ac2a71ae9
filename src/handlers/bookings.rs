use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::db::bookings::ReservationRequest;
use crate::events;
use crate::models::space::VehicleType;
use crate::models::user::{UserProfile, UserRole};
use crate::pricing;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Deserialize)]
pub struct BookingForm {
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// The seeker-side reservation flow: validate, quote, then run the atomic
/// slot-decrement transaction. All validation happens before any write; the
/// slot check itself is repeated on a fresh read inside the transaction.
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(space_id): Path<Uuid>,
    Json(form): Json<BookingForm>,
) -> Result<Response, AppError> {
    let profile = require_profile(&state, user).await?;
    if profile.role == UserRole::Provider {
        return Err(AppError::Forbidden(
            "Provider accounts cannot book spaces.".to_string(),
        ));
    }
    if form.end_time <= form.start_time {
        return Err(AppError::ValidationError(
            "End time must be after start time.".to_string(),
        ));
    }
    if form.vehicle_type == VehicleType::Suv {
        return Err(AppError::ValidationError(
            "Only car and bike slots can be reserved.".to_string(),
        ));
    }

    let space = db::spaces::find(&state.db, space_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Space listing no longer exists.".to_string()))?;
    let rates = space.pricing.for_vehicle(form.vehicle_type).ok_or_else(|| {
        AppError::ValidationError("No rates configured for this vehicle type.".to_string())
    })?;
    let quote = pricing::compute_quote(form.start_time, form.end_time, rates)?;

    let booking = db::bookings::reserve(
        &state.db,
        ReservationRequest {
            space_id,
            seeker: &profile,
            vehicle_type: form.vehicle_type,
            start_time: form.start_time,
            end_time: form.end_time,
            quote,
        },
    )
    .await?;

    tracing::info!(
        booking_id = %booking.id,
        space_id = %space_id,
        seeker_id = %profile.id,
        total_amount = booking.total_amount,
        "Slot reserved"
    );
    events::publish_booking(&state.booking_events, &booking);

    Ok(created(booking, "Slot reserved successfully").into_response())
}

/// Seekers see their reservations, providers the bookings taken against
/// their listings; both newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, AppError> {
    let profile = require_profile(&state, user).await?;
    let bookings = match profile.role {
        UserRole::Provider => db::bookings::list_for_provider(&state.db, profile.id).await?,
        UserRole::Seeker => db::bookings::list_for_seeker(&state.db, profile.id).await?,
    };
    Ok(success(bookings, "Bookings fetched").into_response())
}

async fn require_profile(state: &AppState, user: AuthUser) -> Result<UserProfile, AppError> {
    db::users::find(&state.db, user.0)
        .await?
        .ok_or_else(|| AppError::AuthError("No profile exists for this account.".to_string()))
}
