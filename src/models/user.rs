use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Provider,
    Seeker,
}

/// Profile fields the account holder may set themselves.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDraft {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: String,
}

/// Profile data for an account. Identity itself (sign-up, login, sessions)
/// lives with the external identity provider; the id here is the provider's
/// subject id, never minted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
