use axum::{Router, routing::get};

use super::handlers::{count_participants, list_participants};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_participants))
        .route("/count", get(count_participants))
}
