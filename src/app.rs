use axum::{middleware, routing::get, Json, Router};
use serde_json::json;

use crate::{
    app_state::AppState,
    middleware::tracing::request_tracing_middleware,
    modules::{
        admin::routes::admin_routes, assessment::routes::assessment_routes,
        auth::routes::auth_routes, student::routes::student_routes, teacher::routes::teacher_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes())
        .nest("/api/admin", admin_routes())
        .nest("/api/teacher", teacher_routes())
        .nest("/api/student", student_routes())
        .nest("/api/assessment", assessment_routes())
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Herolearn Backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
