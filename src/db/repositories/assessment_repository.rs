use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{HeroAiQuestion, HeroAiResult};
use crate::db::DbResult;

pub struct AssessmentRepository;

/// Scored output of one completed run, ready to persist.
pub struct ScoredResult {
    pub mission_statement: String,
    pub learning_style: serde_json::Value,
    pub intelligence_type: serde_json::Value,
    pub personality: serde_json::Value,
    pub career_path: serde_json::Value,
    pub hero_journey: String,
    pub action_plan: String,
}

impl AssessmentRepository {
    /// The wizard order: category sequence first, then position within it.
    pub async fn list_active_questions(pool: &PgPool) -> DbResult<Vec<HeroAiQuestion>> {
        let questions = sqlx::query_as::<_, HeroAiQuestion>(
            r#"
            SELECT id, category, question, options, position, is_active
            FROM hero_ai_questions
            WHERE is_active
            ORDER BY category ASC, position ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    pub async fn insert_result(
        pool: &PgPool,
        user_id: Uuid,
        result: &ScoredResult,
    ) -> DbResult<HeroAiResult> {
        let row = sqlx::query_as::<_, HeroAiResult>(
            r#"
            INSERT INTO hero_ai_results
                (user_id, mission_statement, learning_style, intelligence_type,
                 personality, career_path, hero_journey, action_plan)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, mission_statement, learning_style, intelligence_type,
                      personality, career_path, hero_journey, action_plan, created_at
            "#,
        )
        .bind(user_id)
        .bind(&result.mission_statement)
        .bind(&result.learning_style)
        .bind(&result.intelligence_type)
        .bind(&result.personality)
        .bind(&result.career_path)
        .bind(&result.hero_journey)
        .bind(&result.action_plan)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Completed runs accumulate; newest first.
    pub async fn list_results(pool: &PgPool, user_id: Uuid) -> DbResult<Vec<HeroAiResult>> {
        let results = sqlx::query_as::<_, HeroAiResult>(
            r#"
            SELECT id, user_id, mission_statement, learning_style, intelligence_type,
                   personality, career_path, hero_journey, action_plan, created_at
            FROM hero_ai_results
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(results)
    }
}
