use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::error::BackendResult;
use crate::models::{NewParticipantCompetition, ParticipantCompetition};

pub struct ParticipantCompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantCompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all participation rows in insertion order
    pub async fn list(&self) -> BackendResult<Vec<ParticipantCompetition>> {
        let rows = sqlx::query_as::<_, ParticipantCompetition>(
            r#"
            SELECT id, participant_id, competition_id, participant_name, participant_age,
                   additional_participant_name, additional_participant_age, group_members,
                   created_at
            FROM participant_competitions
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create_many(&self, rows: &[NewParticipantCompetition]) -> BackendResult<()> {
        Self::create_many_with(self.pool, rows).await
    }

    /// Insert all rows in a single statement
    pub async fn create_many_with<'e, E>(
        executor: E,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<()>
    where
        E: PgExecutor<'e>,
    {
        if rows.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO participant_competitions (id, participant_id, competition_id, \
             participant_name, participant_age, additional_participant_name, \
             additional_participant_age, group_members) ",
        );

        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.id)
                .push_bind(row.participant_id)
                .push_bind(row.competition_id)
                .push_bind(row.participant_name.clone())
                .push_bind(row.participant_age)
                .push_bind(row.additional_participant_name.clone())
                .push_bind(row.additional_participant_age)
                .push_bind(row.group_members.clone());
        });

        builder.build().execute(executor).await?;

        Ok(())
    }
}
