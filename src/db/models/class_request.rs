use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A teacher's proposal for a net-new course topic, reviewed by an admin.
/// Distinct from the Class entity itself.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ClassRequest {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub title: String,
    pub description: String,
    pub reason: String,
    pub status: RequestStatus,
    pub review_note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewClassRequest {
    #[validate(length(min = 3))]
    pub title: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(length(min = 1))]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewClassRequest {
    pub note: Option<String>,
}
