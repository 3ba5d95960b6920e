use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    class_averages, class_progress, create_assignment, create_class, create_class_request,
    create_content, delete_assignment, delete_class, delete_content, grade_submission,
    list_assignments, list_contents, list_my_class_requests, list_my_classes, list_submissions,
    move_content, update_assignment, update_class, update_class_status, update_content,
};
use crate::app_state::AppState;

pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", post(create_class).get(list_my_classes))
        .route("/classes/{class_id}", put(update_class).delete(delete_class))
        .route("/classes/{class_id}/status", put(update_class_status))
        .route(
            "/classes/{class_id}/contents",
            post(create_content).get(list_contents),
        )
        .route(
            "/classes/{class_id}/contents/{content_id}",
            put(update_content).delete(delete_content),
        )
        .route(
            "/classes/{class_id}/contents/{content_id}/move",
            post(move_content),
        )
        .route(
            "/classes/{class_id}/assignments",
            post(create_assignment).get(list_assignments),
        )
        .route("/classes/{class_id}/progress", get(class_progress))
        .route("/classes/{class_id}/grades", get(class_averages))
        .route(
            "/assignments/{assignment_id}",
            put(update_assignment).delete(delete_assignment),
        )
        .route(
            "/assignments/{assignment_id}/submissions",
            get(list_submissions),
        )
        .route("/submissions/{submission_id}/grade", post(grade_submission))
        .route(
            "/class-requests",
            post(create_class_request).get(list_my_class_requests),
        )
}
