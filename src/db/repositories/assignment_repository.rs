use std::collections::HashMap;

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{
    self, Assignment, AssignmentProgress, AssignmentSubmission, NewAssignment, NewSubmission,
    StudentAssignment, StudentAverage, SubmissionStatus, UpdateAssignment,
};
use crate::db::DbResult;

const ASSIGNMENT_COLUMNS: &str = "id, class_id, teacher_id, title, description, due_date, \
                                  max_score, created_at, updated_at";

const SUBMISSION_COLUMNS: &str = "id, assignment_id, student_id, content, file_url, status, \
                                  score, feedback, submitted_at, graded_at";

pub struct AssignmentRepository;

impl AssignmentRepository {
    pub async fn create(
        pool: &PgPool,
        class_id: Uuid,
        teacher_id: Uuid,
        new_assignment: &NewAssignment,
    ) -> DbResult<Assignment> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            r#"
            INSERT INTO assignments (class_id, teacher_id, title, description, due_date, max_score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ASSIGNMENT_COLUMNS}
            "#,
        ))
        .bind(class_id)
        .bind(teacher_id)
        .bind(&new_assignment.title)
        .bind(&new_assignment.description)
        .bind(new_assignment.due_date)
        .bind(new_assignment.max_score)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_owned(
        pool: &PgPool,
        assignment_id: Uuid,
        teacher_id: Uuid,
    ) -> DbResult<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = $1 AND teacher_id = $2",
        ))
        .bind(assignment_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find(pool: &PgPool, assignment_id: Uuid) -> DbResult<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = $1",
        ))
        .bind(assignment_id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    pub async fn list_for_class(pool: &PgPool, class_id: Uuid) -> DbResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments \
             WHERE class_id = $1 ORDER BY due_date ASC",
        ))
        .bind(class_id)
        .fetch_all(pool)
        .await?;

        Ok(assignments)
    }

    pub async fn update_owned(
        pool: &PgPool,
        assignment_id: Uuid,
        teacher_id: Uuid,
        update: &UpdateAssignment,
    ) -> DbResult<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            r#"
            UPDATE assignments
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                due_date = COALESCE($3, due_date),
                max_score = COALESCE($4, max_score),
                updated_at = NOW()
            WHERE id = $5 AND teacher_id = $6
            RETURNING {ASSIGNMENT_COLUMNS}
            "#,
        ))
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.due_date)
        .bind(update.max_score)
        .bind(assignment_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    pub async fn delete_owned(
        pool: &PgPool,
        assignment_id: Uuid,
        teacher_id: Uuid,
    ) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1 AND teacher_id = $2")
            .bind(assignment_id)
            .bind(teacher_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The student view: each assignment of the class with the caller's own
    /// submission state and the derived overdue flag, joined in memory so the
    /// flag is always recomputed against the current clock.
    pub async fn list_for_student(
        pool: &PgPool,
        class_id: Uuid,
        student_id: Uuid,
    ) -> DbResult<Vec<StudentAssignment>> {
        let assignments = Self::list_for_class(pool, class_id).await?;

        let submissions = sqlx::query_as::<_, AssignmentSubmission>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS} FROM assignment_submissions
            WHERE student_id = $1
              AND assignment_id IN (SELECT id FROM assignments WHERE class_id = $2)
            "#,
        ))
        .bind(student_id)
        .bind(class_id)
        .fetch_all(pool)
        .await?;

        let by_assignment: HashMap<Uuid, AssignmentSubmission> = submissions
            .into_iter()
            .map(|s| (s.assignment_id, s))
            .collect();

        let now = OffsetDateTime::now_utc();
        let view = assignments
            .into_iter()
            .map(|assignment| {
                let submission = by_assignment.get(&assignment.id);
                let overdue = models::is_overdue(assignment.due_date, submission, now);
                StudentAssignment {
                    submission_status: submission
                        .map(|s| s.status)
                        .unwrap_or(SubmissionStatus::Pending),
                    score: submission.and_then(|s| s.score),
                    feedback: submission.and_then(|s| s.feedback.clone()),
                    overdue,
                    assignment,
                }
            })
            .collect();

        Ok(view)
    }

    /// Upsert keyed by the (assignment, student) unique pair. A graded
    /// submission is terminal: the conditional update leaves it untouched and
    /// the call resolves to None.
    pub async fn upsert_submission(
        pool: &PgPool,
        assignment_id: Uuid,
        student_id: Uuid,
        submission: &NewSubmission,
    ) -> DbResult<Option<AssignmentSubmission>> {
        let row = sqlx::query_as::<_, AssignmentSubmission>(&format!(
            r#"
            INSERT INTO assignment_submissions (assignment_id, student_id, content, file_url, status)
            VALUES ($1, $2, $3, $4, 'submitted')
            ON CONFLICT (assignment_id, student_id) DO UPDATE
            SET content = EXCLUDED.content,
                file_url = EXCLUDED.file_url,
                status = 'submitted',
                submitted_at = NOW()
            WHERE assignment_submissions.status <> 'graded'
            RETURNING {SUBMISSION_COLUMNS}
            "#,
        ))
        .bind(assignment_id)
        .bind(student_id)
        .bind(&submission.content)
        .bind(&submission.file_url)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Ownership is checked through the parent assignment.
    pub async fn find_submission_owned(
        pool: &PgPool,
        submission_id: Uuid,
        teacher_id: Uuid,
    ) -> DbResult<Option<(AssignmentSubmission, i32)>> {
        let row = sqlx::query_as::<_, SubmissionWithMax>(
            r#"
            SELECT s.id, s.assignment_id, s.student_id, s.content, s.file_url, s.status,
                   s.score, s.feedback, s.submitted_at, s.graded_at, a.max_score
            FROM assignment_submissions s
            JOIN assignments a ON a.id = s.assignment_id
            WHERE s.id = $1 AND a.teacher_id = $2
            "#,
        )
        .bind(submission_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| {
            let max_score = r.max_score;
            (r.into_submission(), max_score)
        }))
    }

    /// Single atomic update keyed by submission id; the ownership join keeps
    /// a foreign teacher from grading through a guessed id, and the status
    /// predicate keeps a concurrent grade from overwriting one that already
    /// landed. A miss on an existing owned row means it is already graded.
    pub async fn grade(
        pool: &PgPool,
        submission_id: Uuid,
        teacher_id: Uuid,
        score: i32,
        feedback: Option<&str>,
    ) -> DbResult<Option<AssignmentSubmission>> {
        let row = sqlx::query_as::<_, AssignmentSubmission>(
            r#"
            UPDATE assignment_submissions s
            SET status = 'graded', score = $3, feedback = $4, graded_at = NOW()
            FROM assignments a
            WHERE s.id = $1 AND s.assignment_id = a.id AND a.teacher_id = $2
              AND s.status <> 'graded'
            RETURNING s.id, s.assignment_id, s.student_id, s.content, s.file_url, s.status,
                      s.score, s.feedback, s.submitted_at, s.graded_at
            "#,
        )
        .bind(submission_id)
        .bind(teacher_id)
        .bind(score)
        .bind(feedback)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    pub async fn list_submissions_owned(
        pool: &PgPool,
        assignment_id: Uuid,
        teacher_id: Uuid,
    ) -> DbResult<Vec<AssignmentSubmission>> {
        let submissions = sqlx::query_as::<_, AssignmentSubmission>(
            r#"
            SELECT s.id, s.assignment_id, s.student_id, s.content, s.file_url, s.status,
                   s.score, s.feedback, s.submitted_at, s.graded_at
            FROM assignment_submissions s
            JOIN assignments a ON a.id = s.assignment_id
            WHERE s.assignment_id = $1 AND a.teacher_id = $2
            ORDER BY s.submitted_at ASC
            "#,
        )
        .bind(assignment_id)
        .bind(teacher_id)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    pub async fn list_submissions_for_student(
        pool: &PgPool,
        student_id: Uuid,
    ) -> DbResult<Vec<AssignmentSubmission>> {
        let submissions = sqlx::query_as::<_, AssignmentSubmission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM assignment_submissions \
             WHERE student_id = $1 ORDER BY submitted_at DESC",
        ))
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }

    /// Submission and grading counts per assignment, aggregated from the
    /// submissions table at query time. No stored counters exist to drift.
    pub async fn class_progress(
        pool: &PgPool,
        class_id: Uuid,
    ) -> DbResult<Vec<AssignmentProgress>> {
        let progress = sqlx::query_as::<_, AssignmentProgress>(
            r#"
            SELECT a.id AS assignment_id, a.title, a.due_date, a.max_score,
                   COUNT(s.id) AS submitted_count,
                   COUNT(s.id) FILTER (WHERE s.status = 'graded') AS graded_count
            FROM assignments a
            LEFT JOIN assignment_submissions s ON s.assignment_id = a.id
            WHERE a.class_id = $1
            GROUP BY a.id, a.title, a.due_date, a.max_score
            ORDER BY a.due_date ASC
            "#,
        )
        .bind(class_id)
        .fetch_all(pool)
        .await?;

        Ok(progress)
    }

    /// Per-student average over graded submissions, recomputed per read.
    pub async fn class_averages(pool: &PgPool, class_id: Uuid) -> DbResult<Vec<StudentAverage>> {
        let averages = sqlx::query_as::<_, StudentAverage>(
            r#"
            SELECT e.student_id, u.name AS student_name,
                   COUNT(s.id) FILTER (WHERE s.status = 'graded') AS graded_count,
                   AVG(s.score) FILTER (WHERE s.status = 'graded')::float8 AS average_score
            FROM class_enrollments e
            JOIN users u ON u.id = e.student_id
            LEFT JOIN assignments a ON a.class_id = e.class_id
            LEFT JOIN assignment_submissions s
                   ON s.assignment_id = a.id AND s.student_id = e.student_id
            WHERE e.class_id = $1
            GROUP BY e.student_id, u.name
            ORDER BY u.name ASC
            "#,
        )
        .bind(class_id)
        .fetch_all(pool)
        .await?;

        Ok(averages)
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionWithMax {
    id: Uuid,
    assignment_id: Uuid,
    student_id: Uuid,
    content: Option<String>,
    file_url: Option<String>,
    status: SubmissionStatus,
    score: Option<i32>,
    feedback: Option<String>,
    submitted_at: OffsetDateTime,
    graded_at: Option<OffsetDateTime>,
    max_score: i32,
}

impl SubmissionWithMax {
    fn into_submission(self) -> AssignmentSubmission {
        AssignmentSubmission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            content: self.content,
            file_url: self.file_url,
            status: self.status,
            score: self.score,
            feedback: self.feedback,
            submitted_at: self.submitted_at,
            graded_at: self.graded_at,
        }
    }
}
