pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::planning::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-plan", post(handlers::handle_generate_plan))
        .route("/generate-plan-pdf", post(handlers::handle_generate_plan_pdf))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Any origin may call the API; browsers hit it directly.
        .layer(CorsLayer::very_permissive())
}
