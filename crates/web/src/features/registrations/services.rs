use storage::{
    Backend, dto::registration::RegistrationRequest, error::Result,
    services::registration,
};
use uuid::Uuid;

/// Register a household and its competition entries
pub async fn register_participant(
    backend: &dyn Backend,
    request: &RegistrationRequest,
) -> Result<Uuid> {
    registration::register_participant(backend, request).await
}
