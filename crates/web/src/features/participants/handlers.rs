use axum::{Json, extract::State};
use storage::dto::participant::{ParticipantCountResponse, ParticipantView};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "Participants with their competitions, newest first", body = Vec<ParticipantView>),
        (status = 502, description = "Backend read failed")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(state): State<AppState>,
) -> WebResult<Json<Vec<ParticipantView>>> {
    let participants = services::list_participants(state.backend()).await?;

    Ok(Json(participants))
}

#[utoipa::path(
    get,
    path = "/api/participants/count",
    responses(
        (status = 200, description = "Number of registered participants", body = ParticipantCountResponse),
        (status = 502, description = "Backend read failed")
    ),
    tag = "participants"
)]
pub async fn count_participants(
    State(state): State<AppState>,
) -> WebResult<Json<ParticipantCountResponse>> {
    let count = services::count_participants(state.backend()).await?;

    Ok(Json(ParticipantCountResponse { count }))
}
