use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::models::space::{ParkingSpace, SpaceDraft, VehicleType};
use crate::models::user::{UserProfile, UserRole};
use crate::pricing;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

#[derive(Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

pub async fn list_spaces(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let spaces = db::spaces::list_available(&state.db, params.search.as_deref()).await?;
    Ok(success(spaces, "Available spaces fetched").into_response())
}

pub async fn get_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let space = find_space(&state, id).await?;
    Ok(success(space, "Space fetched").into_response())
}

pub async fn my_spaces(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, AppError> {
    let profile = require_provider(&state, user).await?;
    let spaces = db::spaces::list_by_provider(&state.db, profile.id).await?;
    Ok(success(spaces, "Listings fetched").into_response())
}

pub async fn create_space(
    State(state): State<AppState>,
    user: AuthUser,
    Json(draft): Json<SpaceDraft>,
) -> Result<Response, AppError> {
    let profile = require_provider(&state, user).await?;
    validate_draft(&draft)?;

    let space = db::spaces::create(&state.db, profile.id, draft).await?;
    tracing::info!(space_id = %space.id, provider_id = %profile.id, "Space published");
    Ok(created(space, "Space published").into_response())
}

pub async fn update_space(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<SpaceDraft>,
) -> Result<Response, AppError> {
    let profile = require_provider(&state, user).await?;
    validate_draft(&draft)?;
    require_owner(&state, id, &profile).await?;

    let space = db::spaces::update(&state.db, id, draft)
        .await?
        .ok_or_else(|| space_not_found(id))?;
    Ok(success(space, "Space updated").into_response())
}

pub async fn delete_space(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let profile = require_provider(&state, user).await?;
    require_owner(&state, id, &profile).await?;

    if !db::spaces::delete(&state.db, id).await? {
        return Err(space_not_found(id));
    }
    Ok(empty_success("Listing deleted").into_response())
}

#[derive(Deserialize)]
pub struct QuoteParams {
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Pricing preview for a stay; pure computation over the stored rate sheet,
/// no inventory is touched.
pub async fn quote_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<QuoteParams>,
) -> Result<Response, AppError> {
    let space = find_space(&state, id).await?;
    let rates = space.pricing.for_vehicle(params.vehicle_type).ok_or_else(|| {
        AppError::ValidationError("No rates configured for this vehicle type.".to_string())
    })?;
    let quote = pricing::compute_quote(params.start_time, params.end_time, rates)?;
    Ok(success(quote, "Quote computed").into_response())
}

async fn find_space(state: &AppState, id: Uuid) -> Result<ParkingSpace, AppError> {
    db::spaces::find(&state.db, id)
        .await?
        .ok_or_else(|| space_not_found(id))
}

fn space_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Space '{}' was not found.", id))
}

async fn require_provider(state: &AppState, user: AuthUser) -> Result<UserProfile, AppError> {
    let profile = db::users::find(&state.db, user.0)
        .await?
        .ok_or_else(|| AppError::AuthError("No profile exists for this account.".to_string()))?;
    if profile.role != UserRole::Provider {
        return Err(AppError::Forbidden("Provider account required.".to_string()));
    }
    Ok(profile)
}

async fn require_owner(state: &AppState, id: Uuid, profile: &UserProfile) -> Result<(), AppError> {
    let existing = find_space(state, id).await?;
    if existing.provider_id != profile.id {
        return Err(AppError::Forbidden("You do not own this listing.".to_string()));
    }
    Ok(())
}

fn validate_draft(draft: &SpaceDraft) -> Result<(), AppError> {
    if draft.title.trim().is_empty() {
        return Err(AppError::ValidationError("Title must not be empty.".to_string()));
    }
    if draft.address.trim().is_empty() {
        return Err(AppError::ValidationError("Address must not be empty.".to_string()));
    }
    if draft.car_slots < 0 || draft.bike_slots < 0 {
        return Err(AppError::ValidationError(
            "Slot counts cannot be negative.".to_string(),
        ));
    }
    // Negative rates would flow straight through the quote arithmetic and
    // produce negative billed totals.
    let sheets = [
        &draft.pricing.car,
        &draft.pricing.bike,
        &draft.pricing.suv,
    ];
    for rates in sheets.into_iter().flatten() {
        if rates.hourly < 0 || rates.daily < 0 || rates.monthly < 0 {
            return Err(AppError::ValidationError(
                "Rates cannot be negative.".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::space::{RateSheet, SpacePricing};

    fn draft() -> SpaceDraft {
        SpaceDraft {
            title: "Skyline Parking Garage".to_string(),
            description: String::new(),
            address: "Ranganathan Street, T Nagar".to_string(),
            landmark: None,
            amenities: vec![],
            pricing: SpacePricing {
                car: Some(RateSheet {
                    hourly: 10,
                    daily: 50,
                    monthly: 1000,
                }),
                bike: None,
                suv: None,
            },
            car_slots: 1,
            bike_slots: 0,
            image_url: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_draft() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn rejects_blank_title_and_address() {
        let mut blank_title = draft();
        blank_title.title = "   ".to_string();
        assert!(matches!(
            validate_draft(&blank_title),
            Err(AppError::ValidationError(_))
        ));

        let mut blank_address = draft();
        blank_address.address = String::new();
        assert!(matches!(
            validate_draft(&blank_address),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_negative_slot_counts() {
        let mut negative = draft();
        negative.bike_slots = -1;
        assert!(matches!(
            validate_draft(&negative),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_negative_rates_in_any_sheet() {
        // A stored sheet like this would bill negative totals on every quote.
        let mut negative = draft();
        negative.pricing.suv = Some(RateSheet {
            hourly: -10,
            daily: -50,
            monthly: -1000,
        });
        assert!(matches!(
            validate_draft(&negative),
            Err(AppError::ValidationError(_))
        ));

        let mut single_field = draft();
        single_field.pricing.car = Some(RateSheet {
            hourly: 10,
            daily: -50,
            monthly: 1000,
        });
        assert!(matches!(
            validate_draft(&single_field),
            Err(AppError::ValidationError(_))
        ));
    }
}
