use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::db::models::{Session, SessionUser};
use crate::db::DbResult;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        token: &str,
        ttl_hours: i64,
    ) -> DbResult<Session> {
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(ttl_hours);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Resolve a bearer token to its user. Expired sessions resolve to None.
    pub async fn find_user_by_token(pool: &PgPool, token: &str) -> DbResult<Option<SessionUser>> {
        let session_user = sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT u.id AS user_id, u.role, s.expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(session_user)
    }

    pub async fn revoke(pool: &PgPool, token: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn purge_expired(pool: &PgPool, user_id: Uuid) -> DbResult<()> {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
