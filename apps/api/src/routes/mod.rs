pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route(
            "/interview/generate-followups",
            post(handlers::handle_generate_followups)
                .fallback(handlers::handle_method_not_allowed),
        )
        .with_state(state)
}
