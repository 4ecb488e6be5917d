use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::registration::{RegistrationRequest, RegistrationResponse};

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Participant registered", body = RegistrationResponse),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Backend rejected the registration")
    ),
    tag = "registrations"
)]
pub async fn register_participant(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> WebResult<Response> {
    req.validate_registration()?;

    let participant_id = services::register_participant(state.backend(), &req)
        .await
        .map_err(WebError::registration)?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse { participant_id }),
    )
        .into_response())
}
