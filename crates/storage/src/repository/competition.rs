use sqlx::PgPool;

use crate::error::BackendResult;
use crate::models::Competition;

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions
    pub async fn list(&self) -> BackendResult<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, category, description, max_participants, created_at
            FROM competitions
            ORDER BY category ASC, name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }
}
