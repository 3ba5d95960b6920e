use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::auth::{Action, AuthContext, Resource};
use crate::db::models::{
    AssignmentSubmission, Class, ClassContent, ClassEnrollment, EnrolledClass, NewSubmission,
    StudentAssignment,
};
use crate::db::repositories::{
    AssignmentRepository, ClassRepository, ContentRepository, EnrollmentRepository,
};
use crate::error::{AppError, AppResult};

/// Membership gate for class-scoped reads: a class the student is not
/// enrolled in resolves the same as an absent one.
async fn require_enrolled(state: &AppState, class_id: Uuid, student_id: Uuid) -> AppResult<()> {
    if EnrollmentRepository::is_enrolled(&state.db, class_id, student_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("class not found".to_string()))
    }
}

/// Only approved, active classes are browsable.
pub async fn browse_classes(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<Class>>> {
    ctx.authorize(Resource::Class, Action::Read)?;

    let classes = ClassRepository::list_enrollable(&state.db).await?;
    Ok(Json(classes))
}

pub async fn enroll(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ClassEnrollment>)> {
    ctx.authorize(Resource::Enrollment, Action::Create)?;

    let enrollment = EnrollmentRepository::enroll(&state.db, class_id, ctx.user_id)
        .await
        .map_err(|err| match err {
            crate::db::DatabaseError::Duplicate => {
                AppError::Conflict("already enrolled in this class".to_string())
            }
            other => AppError::from(other),
        })?
        .ok_or_else(|| AppError::NotFound("class not found".to_string()))?;

    tracing::info!(class_id = %class_id, student_id = %ctx.user_id, "student enrolled");
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn unenroll(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ctx.authorize(Resource::Enrollment, Action::Delete)?;

    let removed = EnrollmentRepository::unenroll(&state.db, class_id, ctx.user_id).await?;
    if !removed {
        return Err(AppError::NotFound("enrollment not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_enrollments(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<EnrolledClass>>> {
    ctx.authorize(Resource::Enrollment, Action::Read)?;

    let classes = EnrollmentRepository::list_for_student(&state.db, ctx.user_id).await?;
    Ok(Json(classes))
}

pub async fn list_contents(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<ClassContent>>> {
    ctx.authorize(Resource::Content, Action::Read)?;
    require_enrolled(&state, class_id, ctx.user_id).await?;

    let contents = ContentRepository::list_for_class(&state.db, class_id).await?;
    Ok(Json(contents))
}

pub async fn list_assignments(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(class_id): Path<Uuid>,
) -> AppResult<Json<Vec<StudentAssignment>>> {
    ctx.authorize(Resource::Assignment, Action::Read)?;
    require_enrolled(&state, class_id, ctx.user_id).await?;

    let assignments =
        AssignmentRepository::list_for_student(&state.db, class_id, ctx.user_id).await?;
    Ok(Json(assignments))
}

pub async fn submit_assignment(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(assignment_id): Path<Uuid>,
    Json(payload): Json<NewSubmission>,
) -> AppResult<(StatusCode, Json<AssignmentSubmission>)> {
    ctx.authorize(Resource::Submission, Action::Create)?;

    if payload.content.is_none() && payload.file_url.is_none() {
        return Err(AppError::Validation(
            "a submission needs content or a file url".to_string(),
        ));
    }

    let assignment = AssignmentRepository::find(&state.db, assignment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("assignment not found".to_string()))?;
    require_enrolled(&state, assignment.class_id, ctx.user_id).await?;

    // Upsert: resubmitting before grading overwrites; after grading the
    // state is terminal and the write is refused.
    let submission =
        AssignmentRepository::upsert_submission(&state.db, assignment_id, ctx.user_id, &payload)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("submission has already been graded".to_string())
            })?;

    tracing::info!(assignment_id = %assignment_id, student_id = %ctx.user_id, "assignment submitted");
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn my_submissions(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<AssignmentSubmission>>> {
    ctx.authorize(Resource::Submission, Action::Read)?;

    let submissions =
        AssignmentRepository::list_submissions_for_student(&state.db, ctx.user_id).await?;
    Ok(Json(submissions))
}
