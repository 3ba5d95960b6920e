use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use std::collections::HashMap;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "assessment_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssessmentCategory {
    Mission,
    Vak,
    Intelligence,
    Disc,
    Riasec,
}

impl AssessmentCategory {
    /// Choice categories are scored; mission questions are open prompts.
    pub fn is_choice(&self) -> bool {
        !matches!(self, AssessmentCategory::Mission)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct HeroAiQuestion {
    pub id: Uuid,
    pub category: AssessmentCategory,
    pub question: String,
    /// Choice categories carry `[{key, label, trait}]`; null for open prompts.
    pub options: Option<serde_json::Value>,
    pub position: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct HeroAiResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mission_statement: String,
    pub learning_style: serde_json::Value,
    pub intelligence_type: serde_json::Value,
    pub personality: serde_json::Value,
    pub career_path: serde_json::Value,
    pub hero_journey: String,
    pub action_plan: String,
    pub created_at: OffsetDateTime,
}

/// Final wizard step: the whole run is submitted at once and scored
/// server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct AssessmentSubmission {
    #[validate(length(min = 1))]
    pub mission_statement: String,
    #[validate(length(min = 1))]
    pub hero_journey: String,
    #[validate(length(min = 1))]
    pub action_plan: String,
    /// question id -> chosen option key, covering every active choice question
    pub answers: HashMap<Uuid, String>,
}
