use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub description: Option<String>,
    pub max_participants: Option<i32>,
    pub created_at: DateTime<Utc>,
}
