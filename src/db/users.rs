use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{ProfileDraft, UserProfile};
use crate::utils::error::AppError;

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, AppError> {
    let profile = sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn upsert(pool: &PgPool, id: Uuid, draft: ProfileDraft) -> Result<UserProfile, AppError> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, email, name, role, phone)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE SET
            email = EXCLUDED.email,
            name = EXCLUDED.name,
            role = EXCLUDED.role,
            phone = EXCLUDED.phone,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(draft.email)
    .bind(draft.name)
    .bind(draft.role)
    .bind(draft.phone)
    .fetch_one(pool)
    .await?;
    Ok(profile)
}
