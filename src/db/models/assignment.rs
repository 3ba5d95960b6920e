use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Submitted,
    Graded,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub class_id: Uuid,
    pub teacher_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: OffsetDateTime,
    pub max_score: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AssignmentSubmission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub status: SubmissionStatus,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: OffsetDateTime,
    pub graded_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAssignment {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub due_date: OffsetDateTime,
    #[validate(range(min = 1))]
    pub max_score: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignment {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub due_date: Option<OffsetDateTime>,
    #[validate(range(min = 1))]
    pub max_score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct NewSubmission {
    pub content: Option<String>,
    pub file_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GradeSubmission {
    pub score: i32,
    pub feedback: Option<String>,
}

/// Assignment as the student sees it: their own submission state plus the
/// derived overdue flag. Never stored, always recomputed at query time.
#[derive(Debug, Clone, Serialize)]
pub struct StudentAssignment {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub submission_status: SubmissionStatus,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub overdue: bool,
}

/// Per-assignment progress for the owning teacher, recomputed from the
/// submissions table on every read.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AssignmentProgress {
    pub assignment_id: Uuid,
    pub title: String,
    pub due_date: OffsetDateTime,
    pub max_score: i32,
    pub submitted_count: i64,
    pub graded_count: i64,
}

/// Per-student average over graded submissions in one class.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct StudentAverage {
    pub student_id: Uuid,
    pub student_name: String,
    pub graded_count: i64,
    pub average_score: Option<f64>,
}

/// An assignment is overdue only while no submission exists for it.
pub fn is_overdue(due_date: OffsetDateTime, submission: Option<&AssignmentSubmission>, now: OffsetDateTime) -> bool {
    submission.is_none() && due_date < now
}

/// Graded is terminal: neither a resubmission nor a second grade may touch
/// the row. The grading UPDATE carries the same predicate so two concurrent
/// grade requests cannot both land.
pub fn can_grade(status: SubmissionStatus) -> bool {
    status != SubmissionStatus::Graded
}

/// Grading accepts a score within the assignment's configured range.
pub fn validate_score(score: i32, max_score: i32) -> Result<(), String> {
    if score < 0 {
        return Err("score must not be negative".to_string());
    }
    if score > max_score {
        return Err(format!("score exceeds the maximum of {}", max_score));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn submission() -> AssignmentSubmission {
        let now = OffsetDateTime::now_utc();
        AssignmentSubmission {
            id: Uuid::new_v4(),
            assignment_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            content: Some("my essay".to_string()),
            file_url: None,
            status: SubmissionStatus::Submitted,
            score: None,
            feedback: None,
            submitted_at: now,
            graded_at: None,
        }
    }

    #[test]
    fn past_due_without_submission_is_overdue() {
        let now = OffsetDateTime::now_utc();
        assert!(is_overdue(now - Duration::days(1), None, now));
    }

    #[test]
    fn future_due_is_not_overdue() {
        let now = OffsetDateTime::now_utc();
        assert!(!is_overdue(now + Duration::days(1), None, now));
    }

    #[test]
    fn submission_clears_overdue_regardless_of_due_date() {
        let now = OffsetDateTime::now_utc();
        let sub = submission();
        assert!(!is_overdue(now - Duration::days(30), Some(&sub), now));
    }

    #[test]
    fn score_within_range_is_accepted() {
        assert!(validate_score(0, 100).is_ok());
        assert!(validate_score(100, 100).is_ok());
        assert!(validate_score(73, 100).is_ok());
    }

    #[test]
    fn score_above_max_is_rejected() {
        assert!(validate_score(150, 100).is_err());
    }

    #[test]
    fn negative_score_is_rejected() {
        assert!(validate_score(-1, 100).is_err());
    }

    #[test]
    fn pending_and_submitted_are_gradable() {
        assert!(can_grade(SubmissionStatus::Pending));
        assert!(can_grade(SubmissionStatus::Submitted));
    }

    #[test]
    fn graded_is_terminal() {
        assert!(!can_grade(SubmissionStatus::Graded));
    }
}
