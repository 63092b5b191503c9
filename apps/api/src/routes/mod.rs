pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::knowledge::handlers as knowledge;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Knowledge API
        .route("/api/v1/knowledge/stats", get(knowledge::handle_stats))
        .route(
            "/api/v1/knowledge/validation",
            get(knowledge::handle_validation),
        )
        .route("/api/v1/knowledge/reload", post(knowledge::handle_reload))
        .route(
            "/api/v1/occupations/search",
            get(knowledge::handle_search_occupation),
        )
        // Recommendation API
        .route(
            "/api/v1/recommendations",
            post(recommendation::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/summary",
            post(recommendation::handle_summary),
        )
        .route("/api/v1/advice", post(recommendation::handle_advice))
        .route(
            "/api/v1/advice/check",
            get(recommendation::handle_model_check),
        )
        .with_state(state)
}
