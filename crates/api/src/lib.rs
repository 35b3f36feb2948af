pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use serde_json::{Value, json};
use state::AppState;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.app.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.settings.app.max_upload_bytes);

    let concept_routes = Router::new()
        .route("/", get(routes::catalog::list_concepts))
        .route("/{concept_id}/challenges", get(routes::catalog::list_challenges));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/assess", post(routes::assessment::assess))
        .route("/batch-assess", post(routes::assessment::batch_assess))
        .nest("/concepts", concept_routes)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "LinguaCoach Assessment API",
        "status": "running",
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
