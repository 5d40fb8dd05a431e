use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/webhook", post(handlers::webhook))
        .with_state(state)
}
