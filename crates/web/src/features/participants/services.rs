use storage::{
    Backend, dto::participant::ParticipantView, error::Result, services::projection,
};

/// All participants as denormalized views, newest first
pub async fn list_participants(backend: &dyn Backend) -> Result<Vec<ParticipantView>> {
    projection::get_participants_with_competitions(backend).await
}

pub async fn count_participants(backend: &dyn Backend) -> Result<i64> {
    projection::get_participant_count(backend).await
}
