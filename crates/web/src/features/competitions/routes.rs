use axum::{Router, routing::get};

use super::handlers::{
    get_competition_roster, get_competition_stats, list_competitions, reconcile_catalog,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_competitions))
        .route("/stats", get(get_competition_stats))
        .route("/roster", get(get_competition_roster))
        .route("/reconciliation", get(reconcile_catalog))
}
