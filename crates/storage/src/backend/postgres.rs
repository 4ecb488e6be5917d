use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use super::Backend;
use crate::error::{BackendResult, Result, StorageError};
use crate::models::{
    Competition, NewParticipant, NewParticipantCompetition, Participant, ParticipantCompetition,
};
use crate::repository::competition::CompetitionRepository;
use crate::repository::participant::ParticipantRepository;
use crate::repository::participant_competition::ParticipantCompetitionRepository;

/// Postgres-backed storage
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects using `url` as the endpoint and `key` as the role's password
    pub async fn connect(url: &str, key: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| StorageError::Configuration(format!("invalid database URL: {e}")))?
            .password(key);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Read(e.into()))?;

        Ok(Self { pool })
    }

    /// Creates the schema and seeds the competition catalog
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for Database {
    async fn list_competitions(&self) -> BackendResult<Vec<Competition>> {
        CompetitionRepository::new(&self.pool).list().await
    }

    async fn list_participants(&self) -> BackendResult<Vec<Participant>> {
        ParticipantRepository::new(&self.pool).list().await
    }

    async fn list_participant_competitions(&self) -> BackendResult<Vec<ParticipantCompetition>> {
        ParticipantCompetitionRepository::new(&self.pool).list().await
    }

    async fn count_participants(&self) -> BackendResult<i64> {
        ParticipantRepository::new(&self.pool).count().await
    }

    async fn insert_participant(&self, participant: &NewParticipant) -> BackendResult<Participant> {
        ParticipantRepository::new(&self.pool)
            .create(participant)
            .await
    }

    async fn insert_participant_competitions(
        &self,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<()> {
        ParticipantCompetitionRepository::new(&self.pool)
            .create_many(rows)
            .await
    }

    /// Both inserts commit together, so no participant is left without rows
    async fn insert_registration(
        &self,
        participant: &NewParticipant,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<Participant> {
        let mut tx = self.pool.begin().await?;

        let created = ParticipantRepository::create_with(&mut *tx, participant).await?;
        ParticipantCompetitionRepository::create_many_with(&mut *tx, rows).await?;

        tx.commit().await?;

        Ok(created)
    }
}
