use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "class_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Draft,
    Active,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Class {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub status: ClassStatus,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub teacher_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Class {
    /// A class is visible and enrollable for students only once the admin
    /// gate has passed and the teacher has activated it.
    pub fn is_enrollable(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved && self.status == ClassStatus::Active
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewClass {
    #[validate(length(min = 3))]
    pub title: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClass {
    #[validate(length(min = 3))]
    pub title: Option<String>,
    #[validate(length(min = 10))]
    pub description: Option<String>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClassStatus {
    pub status: ClassStatus,
}

#[derive(Debug, Deserialize)]
pub struct RejectClass {
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(approval: ApprovalStatus, status: ClassStatus) -> Class {
        Class {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            description: "1234567890".to_string(),
            thumbnail_url: None,
            status,
            approval_status: approval,
            rejection_reason: None,
            teacher_id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn pending_class_is_never_enrollable() {
        assert!(!class(ApprovalStatus::Pending, ClassStatus::Active).is_enrollable());
        assert!(!class(ApprovalStatus::Pending, ClassStatus::Draft).is_enrollable());
    }

    #[test]
    fn approved_class_needs_active_status() {
        assert!(class(ApprovalStatus::Approved, ClassStatus::Active).is_enrollable());
        assert!(!class(ApprovalStatus::Approved, ClassStatus::Draft).is_enrollable());
        assert!(!class(ApprovalStatus::Approved, ClassStatus::Archived).is_enrollable());
    }

    #[test]
    fn rejected_class_is_never_enrollable() {
        assert!(!class(ApprovalStatus::Rejected, ClassStatus::Active).is_enrollable());
    }
}
