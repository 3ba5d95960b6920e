use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ClassEnrollment {
    pub id: Uuid,
    pub class_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: OffsetDateTime,
}

/// Enrollment joined with its class, for the student's "my classes" view.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EnrolledClass {
    pub class_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub teacher_name: String,
    pub enrolled_at: OffsetDateTime,
}
