use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::{Action, AuthContext, Resource};
use crate::db::models::{AssessmentCategory, AssessmentSubmission, HeroAiQuestion, HeroAiResult};
use crate::db::repositories::{AssessmentRepository, ScoredResult};
use crate::error::{AppError, AppResult};

use super::scoring::score_answers;

/// Fixed question bank in wizard order: category sequence, then position.
pub async fn list_questions(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<HeroAiQuestion>>> {
    ctx.authorize(Resource::Assessment, Action::Read)?;

    let questions = AssessmentRepository::list_active_questions(&state.db).await?;
    Ok(Json(questions))
}

/// Terminal step of the wizard. The client submits raw answers; category
/// scores are computed here and never trusted from the client.
pub async fn submit_assessment(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<AssessmentSubmission>,
) -> AppResult<(StatusCode, Json<HeroAiResult>)> {
    ctx.authorize(Resource::Assessment, Action::Create)?;
    payload.validate()?;

    let questions = AssessmentRepository::list_active_questions(&state.db).await?;
    let mut scores = score_answers(&questions, &payload.answers)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let empty = serde_json::json!({});
    let result = ScoredResult {
        mission_statement: payload.mission_statement,
        learning_style: scores
            .remove(&AssessmentCategory::Vak)
            .unwrap_or_else(|| empty.clone()),
        intelligence_type: scores
            .remove(&AssessmentCategory::Intelligence)
            .unwrap_or_else(|| empty.clone()),
        personality: scores
            .remove(&AssessmentCategory::Disc)
            .unwrap_or_else(|| empty.clone()),
        career_path: scores
            .remove(&AssessmentCategory::Riasec)
            .unwrap_or(empty),
        hero_journey: payload.hero_journey,
        action_plan: payload.action_plan,
    };

    let saved = AssessmentRepository::insert_result(&state.db, ctx.user_id, &result).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_results(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> AppResult<Json<Vec<HeroAiResult>>> {
    ctx.authorize(Resource::Assessment, Action::Read)?;

    let results = AssessmentRepository::list_results(&state.db, ctx.user_id).await?;
    Ok(Json(results))
}
