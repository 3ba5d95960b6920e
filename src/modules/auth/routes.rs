use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{login, logout, me, register, update_profile};
use crate::app_state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me).put(update_profile))
}
