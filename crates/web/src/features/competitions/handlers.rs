use axum::{
    Json,
    extract::{Query, State},
};
use storage::{
    catalog::CatalogReport,
    dto::competition::{CompetitionQuery, CompetitionRoster, CompetitionStats},
    models::Competition,
};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    params(CompetitionQuery),
    responses(
        (status = 200, description = "Competition catalog ordered by category and name", body = Vec<Competition>),
        (status = 400, description = "Unknown category"),
        (status = 502, description = "Backend read failed")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(query): Query<CompetitionQuery>,
) -> WebResult<Json<Vec<Competition>>> {
    let competitions = services::list_competitions(state.backend(), query.category).await?;

    Ok(Json(competitions))
}

#[utoipa::path(
    get,
    path = "/api/competitions/stats",
    responses(
        (status = 200, description = "Distinct competitions entered per category", body = CompetitionStats)
    ),
    tag = "competitions"
)]
pub async fn get_competition_stats(State(state): State<AppState>) -> Json<CompetitionStats> {
    Json(services::get_competition_stats(state.backend()).await)
}

#[utoipa::path(
    get,
    path = "/api/competitions/roster",
    responses(
        (status = 200, description = "Entrants grouped by competition", body = CompetitionRoster),
        (status = 502, description = "Backend read failed")
    ),
    tag = "competitions"
)]
pub async fn get_competition_roster(
    State(state): State<AppState>,
) -> WebResult<Json<CompetitionRoster>> {
    let roster = services::get_competition_roster(state.backend()).await?;

    Ok(Json(roster))
}

#[utoipa::path(
    get,
    path = "/api/competitions/reconciliation",
    responses(
        (status = 200, description = "Differences between the stored catalog and the key table", body = CatalogReport),
        (status = 502, description = "Backend read failed")
    ),
    tag = "competitions"
)]
pub async fn reconcile_catalog(State(state): State<AppState>) -> WebResult<Json<CatalogReport>> {
    let report = services::reconcile_catalog(state.backend()).await?;

    Ok(Json(report))
}
