use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewUser, UpdateUser, User, UserRole};
use crate::db::DbResult;

pub struct UserRepository;

impl UserRepository {
    pub async fn create_user(
        pool: &PgPool,
        new_user: &NewUser,
        password_hash: Option<String>,
        role: UserRole,
    ) -> DbResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, password_hash, role, bio, avatar_url,
                      created_at, updated_at
            "#,
        )
        .bind(new_user.email.to_lowercase())
        .bind(&new_user.name)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, role, bio, avatar_url,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password_hash, role, bio, avatar_url,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        update: &UpdateUser,
    ) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                bio = COALESCE($2, bio),
                avatar_url = COALESCE($3, avatar_url),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, email, name, password_hash, role, bio, avatar_url,
                      created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.bio)
        .bind(&update.avatar_url)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
