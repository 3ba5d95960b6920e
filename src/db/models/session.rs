use serde::Serialize;
use sqlx::types::Uuid;
use time::OffsetDateTime;

use super::UserRole;

/// One row per issued bearer token. Expired rows are ignored at lookup
/// and cleared opportunistically on login.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

/// The session joined with the owning user, as resolved per request.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub expires_at: OffsetDateTime,
}
