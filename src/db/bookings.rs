use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::space::{ParkingSpace, VehicleType};
use crate::models::user::UserProfile;
use crate::pricing::Quote;
use crate::utils::error::AppError;

pub struct ReservationRequest<'a> {
    pub space_id: Uuid,
    pub seeker: &'a UserProfile,
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub quote: Quote,
}

/// Books one slot as a single all-or-nothing unit.
///
/// The space row is re-read freshly inside the transaction with a row lock;
/// concurrent reservations against the same space queue on that lock and see
/// the committed counters, so two seekers can never both take the last slot.
/// Any failure past this point rolls the whole unit back, leaving the
/// counters untouched. A serialization failure surfaces as
/// `TransactionConflict` and is not retried here.
pub async fn reserve(pool: &PgPool, req: ReservationRequest<'_>) -> Result<Booking, AppError> {
    let mut tx = pool.begin().await?;

    let space =
        sqlx::query_as::<_, ParkingSpace>("SELECT * FROM spaces WHERE id = $1 FOR UPDATE")
            .bind(req.space_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Space listing no longer exists.".to_string()))?;

    let updated = space.slots().reserve(req.vehicle_type).ok_or_else(|| {
        let noun = match req.vehicle_type {
            VehicleType::Car => "Car",
            VehicleType::Bike => "Bike",
            VehicleType::Suv => "SUV",
        };
        AppError::SlotsFull(format!("{} slots are now full.", noun))
    })?;

    sqlx::query(
        r#"
        UPDATE spaces
        SET car_slots = $2, bike_slots = $3, total_slots = $4,
            is_available = $5, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(req.space_id)
    .bind(updated.car)
    .bind(updated.bike)
    .bind(updated.total())
    .bind(updated.is_available())
    .execute(&mut *tx)
    .await?;

    // Display fields come from the freshly read space and the seeker profile
    // so booking history survives later edits or deletion of the listing.
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (space_id, seeker_id, provider_id, vehicle_type, start_time, end_time,
             total_amount, status, space_title, space_address, seeker_name, seeker_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(req.space_id)
    .bind(req.seeker.id)
    .bind(space.provider_id)
    .bind(req.vehicle_type)
    .bind(req.start_time)
    .bind(req.end_time)
    .bind(req.quote.total_amount)
    .bind(BookingStatus::Confirmed)
    .bind(&space.title)
    .bind(&space.address)
    .bind(&req.seeker.name)
    .bind(&req.seeker.phone)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(booking)
}

pub async fn list_for_seeker(pool: &PgPool, seeker_id: Uuid) -> Result<Vec<Booking>, AppError> {
    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE seeker_id = $1 ORDER BY created_at DESC",
    )
    .bind(seeker_id)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}

pub async fn list_for_provider(pool: &PgPool, provider_id: Uuid) -> Result<Vec<Booking>, AppError> {
    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE provider_id = $1 ORDER BY created_at DESC",
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;
    Ok(bookings)
}
