use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::policy::{can_access, Action, Resource};
use crate::db::models::UserRole;
use crate::db::repositories::SessionRepository;
use crate::error::AppError;

/// Request-scoped identity. Resolved once per request from the bearer token
/// and passed explicitly into handlers; nothing ambient.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthContext {
    /// Single capability check per request. Ownership of individual rows is
    /// a separate, data-dependent concern handled by owner-scoped queries.
    pub fn authorize(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        if can_access(self.role, resource, action) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "role {:?} may not {:?} {:?}",
                self.role, action, resource
            )))
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Authentication("missing bearer token".to_string()))?;

        let session_user = SessionRepository::find_user_by_token(&state.db, token)
            .await?
            .ok_or_else(|| AppError::Authentication("invalid or expired session".to_string()))?;

        Ok(AuthContext {
            user_id: session_user.user_id,
            role: session_user.role,
        })
    }
}
