use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{Action, AuthContext, Resource};
use crate::db::models::{
    self, Assignment, AssignmentProgress, AssignmentSubmission, Class, ClassContent, ClassRequest,
    GradeSubmission, MoveClassContent, NewAssignment, NewClass, NewClassContent, NewClassRequest,
    StudentAverage, UpdateAssignment, UpdateClass, UpdateClassContent, UpdateClassStatus,
};
use crate::db::repositories::{
    AssignmentRepository, ClassRepository, ClassRequestRepository, ContentRepository,
};
use crate::error::{AppError, AppResult};

fn class_not_found() -> AppError {
    // Not-owned and absent are deliberately indistinguishable
    AppError::NotFound("class not found".to_string())
}

async fn owned_class(state: &AppState, class_id: Uuid, teacher_id: Uuid) -> AppResult<Class> {
    ClassRepository::find_owned(&state.db, class_id, teacher_id)
        .await?
        .ok_or_else(class_not_found)
}

// ---- Classes ----

pub async fn create_class(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<NewClass>,
) -> AppResult<(StatusCode, Json<Class>)> {
    ctx.authorize(Resource::Class, Action::Create)?;
    payload.validate()?;

    let class = ClassRepository::create(&state.db, ctx.user_id, &payload).await?;
    tracing::info!(class_id = %class.id, teacher_id = %ctx.user_id, "class submitted for approval");
    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn list_my_classes(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<Class>>> {
    ctx.authorize(Resource::Class, Action::Read)?;

    let classes = ClassRepository::list_by_teacher(&state.db, ctx.user_id).await?;
    Ok(Json(classes))
}

pub async fn update_class(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<UpdateClass>,
) -> AppResult<Json<Class>> {
    ctx.authorize(Resource::Class, Action::Update)?;
    payload.validate()?;

    let class = ClassRepository::update_owned(&state.db, class_id, ctx.user_id, &payload)
        .await?
        .ok_or_else(class_not_found)?;
    Ok(Json(class))
}

pub async fn update_class_status(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<UpdateClassStatus>,
) -> AppResult<Json<Class>> {
    ctx.authorize(Resource::Class, Action::Update)?;

    // The status edit is gated on approval; an unapproved class resolves the
    // same as an absent one.
    let class =
        ClassRepository::update_status_owned(&state.db, class_id, ctx.user_id, payload.status)
            .await?
            .ok_or_else(class_not_found)?;
    Ok(Json(class))
}

pub async fn delete_class(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ctx.authorize(Resource::Class, Action::Delete)?;

    let deleted = ClassRepository::delete_owned(&state.db, class_id, ctx.user_id).await?;
    if !deleted {
        return Err(class_not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- Contents ----

pub async fn create_content(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<NewClassContent>,
) -> AppResult<(StatusCode, Json<ClassContent>)> {
    ctx.authorize(Resource::Content, Action::Create)?;
    payload.validate()?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let content = ContentRepository::create(&state.db, class_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

pub async fn list_contents(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<ClassContent>>> {
    ctx.authorize(Resource::Content, Action::Read)?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let contents = ContentRepository::list_for_class(&state.db, class_id).await?;
    Ok(Json(contents))
}

pub async fn update_content(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((class_id, content_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateClassContent>,
) -> AppResult<Json<ClassContent>> {
    ctx.authorize(Resource::Content, Action::Update)?;
    payload.validate()?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let content = ContentRepository::update(&state.db, content_id, class_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("content not found".to_string()))?;
    Ok(Json(content))
}

pub async fn delete_content(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((class_id, content_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    ctx.authorize(Resource::Content, Action::Delete)?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let deleted = ContentRepository::delete(&state.db, content_id, class_id).await?;
    if !deleted {
        return Err(AppError::NotFound("content not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_content(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((class_id, content_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<MoveClassContent>,
) -> AppResult<Json<Vec<ClassContent>>> {
    ctx.authorize(Resource::Content, Action::Update)?;
    payload.validate()?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let contents = ContentRepository::move_content(&state.db, class_id, content_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("content not found".to_string()))?;
    Ok(Json(contents))
}

// ---- Assignments & grading ----

pub async fn create_assignment(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
    Json(payload): Json<NewAssignment>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    ctx.authorize(Resource::Assignment, Action::Create)?;
    payload.validate()?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let assignment =
        AssignmentRepository::create(&state.db, class_id, ctx.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn list_assignments(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<Assignment>>> {
    ctx.authorize(Resource::Assignment, Action::Read)?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let assignments = AssignmentRepository::list_for_class(&state.db, class_id).await?;
    Ok(Json(assignments))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(assignment_id): Path<Uuid>,
    Json(payload): Json<UpdateAssignment>,
) -> AppResult<Json<Assignment>> {
    ctx.authorize(Resource::Assignment, Action::Update)?;
    payload.validate()?;

    let assignment =
        AssignmentRepository::update_owned(&state.db, assignment_id, ctx.user_id, &payload)
            .await?
            .ok_or_else(|| AppError::NotFound("assignment not found".to_string()))?;
    Ok(Json(assignment))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(assignment_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ctx.authorize(Resource::Assignment, Action::Delete)?;

    let deleted = AssignmentRepository::delete_owned(&state.db, assignment_id, ctx.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound("assignment not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_submissions(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(assignment_id): Path<Uuid>,
) -> AppResult<Json<Vec<AssignmentSubmission>>> {
    ctx.authorize(Resource::Submission, Action::Read)?;

    AssignmentRepository::find_owned(&state.db, assignment_id, ctx.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("assignment not found".to_string()))?;

    let submissions =
        AssignmentRepository::list_submissions_owned(&state.db, assignment_id, ctx.user_id).await?;
    Ok(Json(submissions))
}

pub async fn grade_submission(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(submission_id): Path<Uuid>,
    Json(payload): Json<GradeSubmission>,
) -> AppResult<Json<AssignmentSubmission>> {
    ctx.authorize(Resource::Grade, Action::Create)?;

    let (submission, max_score) =
        AssignmentRepository::find_submission_owned(&state.db, submission_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("submission not found".to_string()))?;

    // Graded is terminal
    if !models::can_grade(submission.status) {
        return Err(AppError::Conflict(
            "submission has already been graded".to_string(),
        ));
    }

    models::validate_score(payload.score, max_score).map_err(AppError::Validation)?;

    // The submission exists and is owned, so a missed update means another
    // grade landed in between.
    let graded = AssignmentRepository::grade(
        &state.db,
        submission_id,
        ctx.user_id,
        payload.score,
        payload.feedback.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Conflict("submission has already been graded".to_string())
    })?;

    tracing::info!(submission_id = %submission_id, score = payload.score, "submission graded");
    Ok(Json(graded))
}

pub async fn class_progress(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<AssignmentProgress>>> {
    ctx.authorize(Resource::Assignment, Action::Read)?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let progress = AssignmentRepository::class_progress(&state.db, class_id).await?;
    Ok(Json(progress))
}

pub async fn class_averages(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<StudentAverage>>> {
    ctx.authorize(Resource::Grade, Action::Read)?;

    owned_class(&state, class_id, ctx.user_id).await?;
    let averages = AssignmentRepository::class_averages(&state.db, class_id).await?;
    Ok(Json(averages))
}

// ---- Class requests ----

pub async fn create_class_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<NewClassRequest>,
) -> AppResult<(StatusCode, Json<ClassRequest>)> {
    ctx.authorize(Resource::ClassRequest, Action::Create)?;
    payload.validate()?;

    let request = ClassRequestRepository::create(&state.db, ctx.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_my_class_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<ClassRequest>>> {
    ctx.authorize(Resource::ClassRequest, Action::Read)?;

    let requests = ClassRequestRepository::list_by_teacher(&state.db, ctx.user_id).await?;
    Ok(Json(requests))
}
