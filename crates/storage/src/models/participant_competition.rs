use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One enrolment of a participant in one competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ParticipantCompetition {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub competition_id: Uuid,
    pub participant_name: String,
    pub participant_age: Option<i32>,
    pub additional_participant_name: Option<String>,
    pub additional_participant_age: Option<i32>,
    pub group_members: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewParticipantCompetition {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub competition_id: Uuid,
    pub participant_name: String,
    pub participant_age: Option<i32>,
    pub additional_participant_name: Option<String>,
    pub additional_participant_age: Option<i32>,
    pub group_members: Option<String>,
}
