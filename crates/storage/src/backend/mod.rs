//! The relational backend this crate reads from and writes to.
//!
//! Everything above this module talks to a [`Backend`] trait object, so the
//! same writer and projector run against Postgres, a hosted REST endpoint, or
//! the in-memory tables used by tests.

use async_trait::async_trait;

use crate::error::{BackendResult, StorageError};
use crate::models::{
    Competition, NewParticipant, NewParticipantCompetition, Participant, ParticipantCompetition,
};

mod memory;
mod postgres;
mod rest;

pub use memory::InMemoryBackend;
pub use postgres::Database;
pub use rest::RestBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_competitions(&self) -> BackendResult<Vec<Competition>>;

    /// All participants, newest first
    async fn list_participants(&self) -> BackendResult<Vec<Participant>>;

    async fn list_participant_competitions(&self) -> BackendResult<Vec<ParticipantCompetition>>;

    async fn count_participants(&self) -> BackendResult<i64>;

    async fn insert_participant(&self, participant: &NewParticipant) -> BackendResult<Participant>;

    async fn insert_participant_competitions(
        &self,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<()>;

    /// Inserts a participant and then its participation rows.
    ///
    /// The default runs two independent calls: a failure on the second leaves
    /// the participant without rows. Backends with transactions override it.
    async fn insert_registration(
        &self,
        participant: &NewParticipant,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<Participant> {
        let created = self.insert_participant(participant).await?;
        if !rows.is_empty() {
            self.insert_participant_competitions(rows).await?;
        }
        Ok(created)
    }
}

/// Which backend a connection URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Postgres,
    Rest,
}

impl BackendKind {
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| StorageError::Configuration(format!("invalid backend URL: {url}")))?;

        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            "http" | "https" => Ok(BackendKind::Rest),
            other => Err(StorageError::Configuration(format!(
                "unsupported backend scheme: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_from_url() {
        assert_eq!(
            BackendKind::from_url("postgres://db.local:5432/merdeka").unwrap(),
            BackendKind::Postgres
        );
        assert_eq!(
            BackendKind::from_url("postgresql://db.local/merdeka").unwrap(),
            BackendKind::Postgres
        );
        assert_eq!(
            BackendKind::from_url("https://project.supabase.co").unwrap(),
            BackendKind::Rest
        );
    }

    #[test]
    fn test_backend_kind_rejects_unknown_schemes() {
        assert!(matches!(
            BackendKind::from_url("mysql://db.local"),
            Err(StorageError::Configuration(_))
        ));
        assert!(matches!(
            BackendKind::from_url("db.local"),
            Err(StorageError::Configuration(_))
        ));
    }
}
