use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    browse_classes, enroll, list_assignments, list_contents, my_enrollments, my_submissions,
    submit_assignment, unenroll,
};
use crate::app_state::AppState;

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(browse_classes))
        .route("/classes/{class_id}/enroll", post(enroll).delete(unenroll))
        .route("/classes/{class_id}/contents", get(list_contents))
        .route("/classes/{class_id}/assignments", get(list_assignments))
        .route("/enrollments", get(my_enrollments))
        .route(
            "/assignments/{assignment_id}/submit",
            post(submit_assignment),
        )
        .route("/submissions", get(my_submissions))
}
