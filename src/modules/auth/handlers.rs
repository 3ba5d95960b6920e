use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use secrecy::ExposeSecret;
use serde::Serialize;
use time::OffsetDateTime;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{
    bearer_token, generate_session_token, hash_password, verify_password, AuthContext,
};
use crate::db::models::{NewUser, UpdateUser, User, UserLogin, UserRole};
use crate::db::repositories::{SessionRepository, UserRepository};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: OffsetDateTime,
    pub user: User,
}

/// Admin and guest accounts are never self-service; a teacher account on its
/// own grants nothing, since its classes still sit behind the approval gate.
fn self_registration_role(requested: Option<UserRole>) -> Result<UserRole, AppError> {
    match requested.unwrap_or(UserRole::Student) {
        role @ (UserRole::Student | UserRole::Teacher) => Ok(role),
        _ => Err(AppError::Validation(
            "only teacher and student accounts can self-register".to_string(),
        )),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    payload.validate()?;

    let role = self_registration_role(payload.role)?;

    let password_hash = hash_password(payload.password.expose_secret())?;
    let user = UserRepository::create_user(&state.db, &payload, Some(password_hash), role).await?;

    tracing::info!(user_id = %user.id, role = ?user.role, "new user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    // Unknown email, OAuth-only account and wrong password all read the same
    let invalid = || AppError::Authentication("invalid credentials".to_string());

    let user = UserRepository::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !verify_password(payload.password.expose_secret(), hash) {
        return Err(invalid());
    }

    SessionRepository::purge_expired(&state.db, user.id).await?;

    let token = generate_session_token();
    let ttl = state.env.auth.session_ttl_hours;
    let session = SessionRepository::create(&state.db, user.id, &token, ttl).await?;

    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
        user,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    _ctx: AuthContext,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        SessionRepository::revoke(&state.db, token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(State(state): State<AppState>, ctx: AuthContext) -> AppResult<Json<User>> {
    let user = UserRepository::find_by_id(&state.db, ctx.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let user = UserRepository::update_profile(&state.db, ctx.user_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_defaults_to_student() {
        assert_eq!(self_registration_role(None).unwrap(), UserRole::Student);
    }

    #[test]
    fn student_and_teacher_can_self_register() {
        assert_eq!(
            self_registration_role(Some(UserRole::Student)).unwrap(),
            UserRole::Student
        );
        assert_eq!(
            self_registration_role(Some(UserRole::Teacher)).unwrap(),
            UserRole::Teacher
        );
    }

    #[test]
    fn admin_and_guest_cannot_self_register() {
        assert!(matches!(
            self_registration_role(Some(UserRole::Admin)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            self_registration_role(Some(UserRole::Guest)),
            Err(AppError::Validation(_))
        ));
    }
}
