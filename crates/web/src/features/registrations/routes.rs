use axum::{Router, routing::post};

use super::handlers::register_participant;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(register_participant))
}
