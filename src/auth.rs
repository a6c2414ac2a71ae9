use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::utils::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The verified caller identity. Authentication itself is owned by the
/// identity provider at the edge; by the time a request reaches this service
/// the gateway has validated the session and forwarded the subject id.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::AuthError(format!("Missing or invalid {} header.", USER_ID_HEADER))
            })
    }
}
