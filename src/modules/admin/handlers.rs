use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::{Action, AuthContext, Resource};
use crate::db::models::{Class, ClassRequest, RejectClass, ReviewClassRequest};
use crate::db::repositories::{ClassRepository, ClassRequestRepository};
use crate::error::{AppError, AppResult};

pub async fn list_pending_classes(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<Class>>> {
    ctx.authorize(Resource::ClassApproval, Action::Read)?;

    let classes = ClassRepository::list_pending(&state.db).await?;
    Ok(Json(classes))
}

/// Idempotent: approving an already approved class returns the same state.
pub async fn approve_class(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Class>> {
    ctx.authorize(Resource::ClassApproval, Action::Update)?;

    let class = ClassRepository::approve(&state.db, class_id)
        .await?
        .ok_or_else(|| AppError::NotFound("class not found".to_string()))?;

    tracing::info!(class_id = %class.id, "class approved");
    Ok(Json(class))
}

/// The reason is persisted on the class and surfaces in the owning
/// teacher's listing; no notification is dispatched.
pub async fn reject_class(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<RejectClass>,
) -> AppResult<Json<Class>> {
    ctx.authorize(Resource::ClassApproval, Action::Update)?;

    let class = ClassRepository::reject(&state.db, class_id, payload.reason.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("class not found".to_string()))?;

    tracing::info!(class_id = %class.id, "class rejected");
    Ok(Json(class))
}

pub async fn list_pending_class_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<ClassRequest>>> {
    ctx.authorize(Resource::ClassRequestReview, Action::Read)?;

    let requests = ClassRequestRepository::list_pending(&state.db).await?;
    Ok(Json(requests))
}

pub async fn approve_class_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ReviewClassRequest>,
) -> AppResult<Json<ClassRequest>> {
    ctx.authorize(Resource::ClassRequestReview, Action::Update)?;

    let request = ClassRequestRepository::approve(&state.db, request_id, payload.note.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("class request not found".to_string()))?;
    Ok(Json(request))
}

pub async fn reject_class_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<ReviewClassRequest>,
) -> AppResult<Json<ClassRequest>> {
    ctx.authorize(Resource::ClassRequestReview, Action::Update)?;

    let request = ClassRequestRepository::reject(&state.db, request_id, payload.note.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("class request not found".to_string()))?;
    Ok(Json(request))
}
