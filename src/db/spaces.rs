use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::space::{ParkingSpace, SlotCounts, SpaceDraft};
use crate::utils::error::AppError;

/// Builds a substring ILIKE pattern from user input. `%`, `_` and `\` are
/// wildcards/escapes to Postgres and must be escaped so a search for a
/// literal "100%" does not match every row.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Seeker-facing browse query: available spaces only, biggest first.
pub async fn list_available(
    pool: &PgPool,
    search: Option<&str>,
) -> Result<Vec<ParkingSpace>, AppError> {
    let pattern = search.map(like_pattern);
    let spaces = sqlx::query_as::<_, ParkingSpace>(
        r#"
        SELECT * FROM spaces
        WHERE is_available
          AND ($1::TEXT IS NULL OR title ILIKE $1 OR address ILIKE $1)
        ORDER BY total_slots DESC
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(spaces)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<ParkingSpace>, AppError> {
    let space = sqlx::query_as::<_, ParkingSpace>("SELECT * FROM spaces WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(space)
}

pub async fn list_by_provider(
    pool: &PgPool,
    provider_id: Uuid,
) -> Result<Vec<ParkingSpace>, AppError> {
    let spaces = sqlx::query_as::<_, ParkingSpace>(
        "SELECT * FROM spaces WHERE provider_id = $1 ORDER BY created_at DESC",
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(spaces)
}

pub async fn create(
    pool: &PgPool,
    provider_id: Uuid,
    draft: SpaceDraft,
) -> Result<ParkingSpace, AppError> {
    let slots = SlotCounts {
        car: draft.car_slots,
        bike: draft.bike_slots,
    };
    let space = sqlx::query_as::<_, ParkingSpace>(
        r#"
        INSERT INTO spaces
            (provider_id, title, description, address, landmark, amenities,
             pricing, car_slots, bike_slots, total_slots, is_available, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(provider_id)
    .bind(draft.title)
    .bind(draft.description)
    .bind(draft.address)
    .bind(draft.landmark)
    .bind(draft.amenities)
    .bind(Json(draft.pricing))
    .bind(slots.car)
    .bind(slots.bike)
    .bind(slots.total())
    .bind(slots.is_available())
    .bind(draft.image_url)
    .fetch_one(pool)
    .await?;
    Ok(space)
}

/// Provider capacity-management edit. Deliberately a plain last-write-wins
/// update; only the booking decrement path carries the atomicity guarantee.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    draft: SpaceDraft,
) -> Result<Option<ParkingSpace>, AppError> {
    let slots = SlotCounts {
        car: draft.car_slots,
        bike: draft.bike_slots,
    };
    let space = sqlx::query_as::<_, ParkingSpace>(
        r#"
        UPDATE spaces SET
            title = $2, description = $3, address = $4, landmark = $5,
            amenities = $6, pricing = $7, car_slots = $8, bike_slots = $9,
            total_slots = $10, is_available = $11, image_url = $12,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(draft.title)
    .bind(draft.description)
    .bind(draft.address)
    .bind(draft.landmark)
    .bind(draft.amenities)
    .bind(Json(draft.pricing))
    .bind(slots.car)
    .bind(slots.bike)
    .bind(slots.total())
    .bind(slots.is_available())
    .bind(draft.image_url)
    .fetch_optional(pool)
    .await?;
    Ok(space)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_become_substring_patterns() {
        assert_eq!(like_pattern("T Nagar"), "%T Nagar%");
    }

    #[test]
    fn wildcard_characters_are_matched_literally() {
        assert_eq!(like_pattern("100% covered"), "%100\\% covered%");
        assert_eq!(like_pattern("lot_7"), "%lot\\_7%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
