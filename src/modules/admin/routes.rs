use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_class, approve_class_request, list_pending_class_requests, list_pending_classes,
    reject_class, reject_class_request,
};
use crate::app_state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/classes/pending", get(list_pending_classes))
        .route("/classes/{class_id}/approve", post(approve_class))
        .route("/classes/{class_id}/reject", post(reject_class))
        .route("/class-requests/pending", get(list_pending_class_requests))
        .route(
            "/class-requests/{request_id}/approve",
            post(approve_class_request),
        )
        .route(
            "/class-requests/{request_id}/reject",
            post(reject_class_request),
        )
}
