use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ClassEnrollment, EnrolledClass};
use crate::db::DbResult;

pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Guarded insert: the row is only created against an approved, active
    /// class, so a stale class id cannot slip through between browse and
    /// enroll. None means the class is not enrollable (or absent); a
    /// duplicate enrollment surfaces as DatabaseError::Duplicate via the
    /// unique (class_id, student_id) constraint.
    pub async fn enroll(
        pool: &PgPool,
        class_id: Uuid,
        student_id: Uuid,
    ) -> DbResult<Option<ClassEnrollment>> {
        let enrollment = sqlx::query_as::<_, ClassEnrollment>(
            r#"
            INSERT INTO class_enrollments (class_id, student_id)
            SELECT $1, $2
            WHERE EXISTS (
                SELECT 1 FROM classes
                WHERE id = $1 AND approval_status = 'approved' AND status = 'active'
            )
            RETURNING id, class_id, student_id, enrolled_at
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }

    pub async fn unenroll(pool: &PgPool, class_id: Uuid, student_id: Uuid) -> DbResult<bool> {
        let result =
            sqlx::query("DELETE FROM class_enrollments WHERE class_id = $1 AND student_id = $2")
                .bind(class_id)
                .bind(student_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_student(pool: &PgPool, student_id: Uuid) -> DbResult<Vec<EnrolledClass>> {
        let classes = sqlx::query_as::<_, EnrolledClass>(
            r#"
            SELECT c.id AS class_id, c.title, c.description, c.thumbnail_url,
                   u.name AS teacher_name, e.enrolled_at
            FROM class_enrollments e
            JOIN classes c ON c.id = e.class_id
            JOIN users u ON u.id = c.teacher_id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(classes)
    }

    pub async fn is_enrolled(pool: &PgPool, class_id: Uuid, student_id: Uuid) -> DbResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM class_enrollments WHERE class_id = $1 AND student_id = $2)",
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }
}
