use std::time::Duration;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::features::{competitions, participants, registrations};
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/registrations", registrations::routes::routes())
        .nest("/participants", participants::routes::routes())
        .nest("/competitions", competitions::routes::routes())
}

/// The full application with state, CORS and request tracing applied
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
