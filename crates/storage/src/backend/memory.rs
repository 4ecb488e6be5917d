use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::Backend;
use crate::catalog;
use crate::error::{BackendError, BackendResult};
use crate::models::{
    Competition, NewParticipant, NewParticipantCompetition, Participant, ParticipantCompetition,
};

#[derive(Default)]
struct Tables {
    competitions: Vec<Competition>,
    participants: Vec<Participant>,
    participant_competitions: Vec<ParticipantCompetition>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing creation timestamps keep "newest first" well defined
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// Process-local tables with switchable failures
#[derive(Default)]
pub struct InMemoryBackend {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    fail_participant_writes: AtomicBool,
    fail_participation_writes: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with the default competition catalog
    pub fn seeded() -> Self {
        Self::with_competitions(catalog::default_competitions())
    }

    pub fn with_competitions(competitions: Vec<Competition>) -> Self {
        let backend = Self::default();
        backend.tables.write().competitions = competitions;
        backend
    }

    pub fn competitions(&self) -> Vec<Competition> {
        self.tables.read().competitions.clone()
    }

    pub fn add_competition(&self, competition: Competition) {
        self.tables.write().competitions.push(competition);
    }

    /// Participants in insertion order
    pub fn participants(&self) -> Vec<Participant> {
        self.tables.read().participants.clone()
    }

    pub fn participant_competitions(&self) -> Vec<ParticipantCompetition> {
        self.tables.read().participant_competitions.clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_participant_writes(&self, fail: bool) {
        self.fail_participant_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_participation_writes(&self, fail: bool) {
        self.fail_participation_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> BackendResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_competitions(&self) -> BackendResult<Vec<Competition>> {
        self.check_reads()?;
        let mut competitions = self.competitions();
        competitions.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(competitions)
    }

    async fn list_participants(&self) -> BackendResult<Vec<Participant>> {
        self.check_reads()?;
        let mut participants = self.participants();
        participants.reverse();
        Ok(participants)
    }

    async fn list_participant_competitions(&self) -> BackendResult<Vec<ParticipantCompetition>> {
        self.check_reads()?;
        Ok(self.participant_competitions())
    }

    async fn count_participants(&self) -> BackendResult<i64> {
        self.check_reads()?;
        Ok(self.tables.read().participants.len() as i64)
    }

    async fn insert_participant(&self, participant: &NewParticipant) -> BackendResult<Participant> {
        if self.fail_participant_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(
                "participant writes disabled".to_string(),
            ));
        }

        let mut tables = self.tables.write();
        let created = Participant {
            id: participant.id,
            block: participant.block.clone(),
            house_number: participant.house_number.clone(),
            registration_date: participant.registration_date,
            created_at: tables.next_created_at(),
        };
        tables.participants.push(created.clone());

        Ok(created)
    }

    async fn insert_participant_competitions(
        &self,
        rows: &[NewParticipantCompetition],
    ) -> BackendResult<()> {
        if self.fail_participation_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(
                "participation writes disabled".to_string(),
            ));
        }

        let mut tables = self.tables.write();
        let created_at = tables.next_created_at();
        tables
            .participant_competitions
            .extend(rows.iter().map(|row| ParticipantCompetition {
                id: row.id,
                participant_id: row.participant_id,
                competition_id: row.competition_id,
                participant_name: row.participant_name.clone(),
                participant_age: row.participant_age,
                additional_participant_name: row.additional_participant_name.clone(),
                additional_participant_age: row.additional_participant_age,
                group_members: row.group_members.clone(),
                created_at,
            }));

        Ok(())
    }
}
