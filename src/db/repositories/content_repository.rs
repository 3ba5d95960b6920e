use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{self, ClassContent, MoveClassContent, NewClassContent, UpdateClassContent};
use crate::db::{DatabaseError, DbResult};

const CONTENT_COLUMNS: &str = "id, class_id, title, description, content_type, file_url, \
                               position, created_at, updated_at";

pub struct ContentRepository;

impl ContentRepository {
    /// Appends at the end of the class's sequence.
    pub async fn create(
        pool: &PgPool,
        class_id: Uuid,
        new_content: &NewClassContent,
    ) -> DbResult<ClassContent> {
        let content = sqlx::query_as::<_, ClassContent>(&format!(
            r#"
            INSERT INTO class_contents (class_id, title, description, content_type, file_url, position)
            VALUES ($1, $2, $3, $4, $5,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM class_contents WHERE class_id = $1))
            RETURNING {CONTENT_COLUMNS}
            "#,
        ))
        .bind(class_id)
        .bind(&new_content.title)
        .bind(&new_content.description)
        .bind(new_content.content_type)
        .bind(&new_content.file_url)
        .fetch_one(pool)
        .await?;

        Ok(content)
    }

    pub async fn list_for_class(pool: &PgPool, class_id: Uuid) -> DbResult<Vec<ClassContent>> {
        let contents = sqlx::query_as::<_, ClassContent>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM class_contents \
             WHERE class_id = $1 ORDER BY position ASC",
        ))
        .bind(class_id)
        .fetch_all(pool)
        .await?;

        Ok(contents)
    }

    pub async fn update(
        pool: &PgPool,
        content_id: Uuid,
        class_id: Uuid,
        update: &UpdateClassContent,
    ) -> DbResult<Option<ClassContent>> {
        let content = sqlx::query_as::<_, ClassContent>(&format!(
            r#"
            UPDATE class_contents
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                content_type = COALESCE($3, content_type),
                file_url = COALESCE($4, file_url),
                updated_at = NOW()
            WHERE id = $5 AND class_id = $6
            RETURNING {CONTENT_COLUMNS}
            "#,
        ))
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.content_type)
        .bind(&update.file_url)
        .bind(content_id)
        .bind(class_id)
        .fetch_optional(pool)
        .await?;

        Ok(content)
    }

    pub async fn delete(pool: &PgPool, content_id: Uuid, class_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM class_contents WHERE id = $1 AND class_id = $2")
            .bind(content_id)
            .bind(class_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Transactional move: the sibling rows are locked, renumbered densely
    /// with the moved item at the requested position, and written back in one
    /// transaction. Free-form position writes are not offered.
    pub async fn move_content(
        pool: &PgPool,
        class_id: Uuid,
        content_id: Uuid,
        target: &MoveClassContent,
    ) -> DbResult<Option<Vec<ClassContent>>> {
        let mut tx = pool.begin().await?;

        let siblings: Vec<Uuid> = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM class_contents WHERE class_id = $1 ORDER BY position ASC FOR UPDATE",
        )
        .bind(class_id)
        .fetch_all(&mut *tx)
        .await?;

        if !siblings.contains(&content_id) {
            tx.rollback().await?;
            return Ok(None);
        }

        let ordered = models::reorder(&siblings, content_id, target.position as usize);
        for (index, id) in ordered.iter().enumerate() {
            sqlx::query("UPDATE class_contents SET position = $1, updated_at = NOW() WHERE id = $2")
                .bind((index + 1) as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionError(e.to_string()))?;

        let contents = Self::list_for_class(pool, class_id).await?;
        Ok(Some(contents))
    }
}
