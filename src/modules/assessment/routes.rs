use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_questions, list_results, submit_assessment};
use crate::app_state::AppState;

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/submit", post(submit_assessment))
        .route("/results", get(list_results))
}
