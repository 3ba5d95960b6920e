use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Class, ClassStatus, NewClass, UpdateClass};
use crate::db::DbResult;

const CLASS_COLUMNS: &str = "id, title, description, thumbnail_url, status, approval_status, \
                             rejection_reason, teacher_id, created_at, updated_at";

pub struct ClassRepository;

impl ClassRepository {
    /// New classes always enter the approval gate as pending drafts.
    pub async fn create(pool: &PgPool, teacher_id: Uuid, new_class: &NewClass) -> DbResult<Class> {
        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            INSERT INTO classes (title, description, thumbnail_url, teacher_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(&new_class.title)
        .bind(&new_class.description)
        .bind(&new_class.thumbnail_url)
        .bind(teacher_id)
        .fetch_one(pool)
        .await?;

        Ok(class)
    }

    pub async fn list_by_teacher(pool: &PgPool, teacher_id: Uuid) -> DbResult<Vec<Class>> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE teacher_id = $1 ORDER BY created_at DESC",
        ))
        .bind(teacher_id)
        .fetch_all(pool)
        .await?;

        Ok(classes)
    }

    pub async fn list_pending(pool: &PgPool) -> DbResult<Vec<Class>> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes \
             WHERE approval_status = 'pending' ORDER BY created_at ASC",
        ))
        .fetch_all(pool)
        .await?;

        Ok(classes)
    }

    /// The student-facing browse query. Pending or rejected classes never
    /// appear here, nor do approved ones the teacher has not activated.
    pub async fn list_enrollable(pool: &PgPool) -> DbResult<Vec<Class>> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes \
             WHERE approval_status = 'approved' AND status = 'active' \
             ORDER BY created_at DESC",
        ))
        .fetch_all(pool)
        .await?;

        Ok(classes)
    }

    /// Owner-scoped lookup: a class owned by someone else resolves to None,
    /// indistinguishable from an absent row.
    pub async fn find_owned(
        pool: &PgPool,
        class_id: Uuid,
        teacher_id: Uuid,
    ) -> DbResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 AND teacher_id = $2",
        ))
        .bind(class_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(class)
    }

    pub async fn update_owned(
        pool: &PgPool,
        class_id: Uuid,
        teacher_id: Uuid,
        update: &UpdateClass,
    ) -> DbResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            UPDATE classes
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                thumbnail_url = COALESCE($3, thumbnail_url),
                updated_at = NOW()
            WHERE id = $4 AND teacher_id = $5
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.thumbnail_url)
        .bind(class_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(class)
    }

    /// Draft/active/archived edits are only available once the class has
    /// passed the approval gate.
    pub async fn update_status_owned(
        pool: &PgPool,
        class_id: Uuid,
        teacher_id: Uuid,
        status: ClassStatus,
    ) -> DbResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            UPDATE classes
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND teacher_id = $3 AND approval_status = 'approved'
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(status)
        .bind(class_id)
        .bind(teacher_id)
        .fetch_optional(pool)
        .await?;

        Ok(class)
    }

    pub async fn delete_owned(pool: &PgPool, class_id: Uuid, teacher_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1 AND teacher_id = $2")
            .bind(class_id)
            .bind(teacher_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Idempotent: re-approving an approved class leaves it approved.
    /// Rejected is not terminal; approving a rejected class reverses the
    /// rejection and clears the stored reason, since no other path exists
    /// for a class to re-enter review.
    pub async fn approve(pool: &PgPool, class_id: Uuid) -> DbResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            UPDATE classes
            SET approval_status = 'approved', rejection_reason = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(class_id)
        .fetch_optional(pool)
        .await?;

        Ok(class)
    }

    pub async fn reject(
        pool: &PgPool,
        class_id: Uuid,
        reason: Option<&str>,
    ) -> DbResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            r#"
            UPDATE classes
            SET approval_status = 'rejected', rejection_reason = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLASS_COLUMNS}
            "#,
        ))
        .bind(class_id)
        .bind(reason)
        .fetch_optional(pool)
        .await?;

        Ok(class)
    }
}
