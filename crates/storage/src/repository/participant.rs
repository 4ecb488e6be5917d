use sqlx::{PgExecutor, PgPool};

use crate::error::BackendResult;
use crate::models::{NewParticipant, Participant};

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all participants, newest first
    pub async fn list(&self) -> BackendResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, block, house_number, registration_date, created_at
            FROM participants
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn count(&self) -> BackendResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participants")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Create a new participant
    pub async fn create(&self, participant: &NewParticipant) -> BackendResult<Participant> {
        Self::create_with(self.pool, participant).await
    }

    /// Create a participant on any executor, so it can join a transaction
    pub async fn create_with<'e, E>(
        executor: E,
        participant: &NewParticipant,
    ) -> BackendResult<Participant>
    where
        E: PgExecutor<'e>,
    {
        let created = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (id, block, house_number, registration_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, block, house_number, registration_date, created_at
            "#,
        )
        .bind(participant.id)
        .bind(&participant.block)
        .bind(&participant.house_number)
        .bind(participant.registration_date)
        .fetch_one(executor)
        .await?;

        Ok(created)
    }
}
