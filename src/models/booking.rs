use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::space::VehicleType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// One reservation event. Space, seeker and provider are weak references by
/// id; the display fields are denormalized at booking time so dashboards can
/// render history even after the listing is edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub space_id: Uuid,
    pub seeker_id: Uuid,
    pub provider_id: Uuid,
    pub vehicle_type: VehicleType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub space_title: String,
    pub space_address: String,
    pub seeker_name: String,
    pub seeker_phone: String,
    pub created_at: DateTime<Utc>,
}
