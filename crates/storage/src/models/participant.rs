use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A household registration: one per submitted form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub block: String,
    pub house_number: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `participants`; the id is generated client-side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewParticipant {
    pub id: Uuid,
    pub block: String,
    pub house_number: String,
    pub registration_date: DateTime<Utc>,
}

impl NewParticipant {
    pub fn new(block: impl Into<String>, house_number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            block: block.into(),
            house_number: house_number.into(),
            registration_date: Utc::now(),
        }
    }
}
