use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ClassRequest, NewClassRequest};
use crate::db::DbResult;

const REQUEST_COLUMNS: &str = "id, teacher_id, title, description, reason, status, review_note, \
                               created_at, updated_at";

pub struct ClassRequestRepository;

impl ClassRequestRepository {
    pub async fn create(
        pool: &PgPool,
        teacher_id: Uuid,
        new_request: &NewClassRequest,
    ) -> DbResult<ClassRequest> {
        let request = sqlx::query_as::<_, ClassRequest>(&format!(
            r#"
            INSERT INTO class_requests (teacher_id, title, description, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(teacher_id)
        .bind(&new_request.title)
        .bind(&new_request.description)
        .bind(&new_request.reason)
        .fetch_one(pool)
        .await?;

        Ok(request)
    }

    pub async fn list_by_teacher(pool: &PgPool, teacher_id: Uuid) -> DbResult<Vec<ClassRequest>> {
        let requests = sqlx::query_as::<_, ClassRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM class_requests \
             WHERE teacher_id = $1 ORDER BY created_at DESC",
        ))
        .bind(teacher_id)
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_pending(pool: &PgPool) -> DbResult<Vec<ClassRequest>> {
        let requests = sqlx::query_as::<_, ClassRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM class_requests \
             WHERE status = 'pending' ORDER BY created_at ASC",
        ))
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }

    pub async fn approve(
        pool: &PgPool,
        request_id: Uuid,
        note: Option<&str>,
    ) -> DbResult<Option<ClassRequest>> {
        Self::review(pool, request_id, "approved", note).await
    }

    pub async fn reject(
        pool: &PgPool,
        request_id: Uuid,
        note: Option<&str>,
    ) -> DbResult<Option<ClassRequest>> {
        Self::review(pool, request_id, "rejected", note).await
    }

    async fn review(
        pool: &PgPool,
        request_id: Uuid,
        status: &str,
        note: Option<&str>,
    ) -> DbResult<Option<ClassRequest>> {
        let request = sqlx::query_as::<_, ClassRequest>(&format!(
            r#"
            UPDATE class_requests
            SET status = $2::request_status, review_note = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#,
        ))
        .bind(request_id)
        .bind(status)
        .bind(note)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }
}
