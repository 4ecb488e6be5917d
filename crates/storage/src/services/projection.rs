use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::backend::Backend;
use crate::catalog::{CompetitionIndex, ResolvedCompetition, Unresolved};
use crate::dto::competition::CompetitionStats;
use crate::dto::participant::ParticipantView;
use crate::error::{Result, StorageError};
use crate::models::{Category, Competition, Participant, ParticipantCompetition};

/// Reshapes normalized rows into one view per participant, newest first.
///
/// Rows whose competition is unknown or whose name has no key are left out.
/// Within a category the first row fills the names and ages; later rows only
/// add their key.
pub fn project_participants(
    participants: &[Participant],
    rows: &[ParticipantCompetition],
    competitions: &[Competition],
) -> Vec<ParticipantView> {
    let index = CompetitionIndex::new(competitions);

    let mut rows_by_participant: HashMap<Uuid, Vec<&ParticipantCompetition>> = HashMap::new();
    for row in rows {
        rows_by_participant
            .entry(row.participant_id)
            .or_default()
            .push(row);
    }

    let mut skipped = 0usize;
    let mut views: Vec<ParticipantView> = participants
        .iter()
        .map(|participant| {
            let mut view = ParticipantView::from(participant);
            for row in rows_by_participant.get(&participant.id).into_iter().flatten() {
                match index.resolve(&row.competition_id) {
                    Ok(resolved) => apply_row(&mut view, resolved, row),
                    Err(reason) => {
                        log_unresolved(row, reason);
                        skipped += 1;
                    }
                }
            }
            view
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(skipped, "Participation rows left out of the projection");
    }

    views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    views
}

fn apply_row(view: &mut ParticipantView, resolved: ResolvedCompetition<'_>, row: &ParticipantCompetition) {
    let category = resolved.competition.category;
    view.add_competition(category, resolved.key);

    if !view.lead_field(category).is_empty() {
        return;
    }

    match category {
        Category::Child => {
            view.child_participant1_name = row.participant_name.clone();
            view.child_participant1_age = age_text(row.participant_age);
            view.child_participant2_name = row.additional_participant_name.clone().unwrap_or_default();
            view.child_participant2_age = age_text(row.additional_participant_age);
        }
        Category::AdultIndividual => {
            view.adult_participant1_name = row.participant_name.clone();
            view.adult_participant2_name = row.additional_participant_name.clone().unwrap_or_default();
        }
        Category::AdultGroup => {
            view.group_members = row.group_members.clone().unwrap_or_default();
        }
    }
}

fn age_text(age: Option<i32>) -> String {
    age.map(|age| age.to_string()).unwrap_or_default()
}

fn log_unresolved(row: &ParticipantCompetition, reason: Unresolved<'_>) {
    match reason {
        Unresolved::UnknownCompetition(id) => {
            tracing::debug!(row_id = %row.id, competition_id = %id, "Participation references unknown competition");
        }
        Unresolved::UnmappedName(name) => {
            tracing::debug!(row_id = %row.id, competition = name, "Competition name has no key");
        }
    }
}

/// Distinct competitions entered per category; unresolvable rows don't count
pub fn competition_stats(
    rows: &[ParticipantCompetition],
    competitions: &[Competition],
) -> CompetitionStats {
    let index = CompetitionIndex::new(competitions);
    let mut entered: HashMap<Category, HashSet<Uuid>> = HashMap::new();

    for row in rows {
        if let Ok(resolved) = index.resolve(&row.competition_id) {
            entered
                .entry(resolved.competition.category)
                .or_default()
                .insert(row.competition_id);
        }
    }

    let count = |category: Category| entered.get(&category).map_or(0, HashSet::len);

    CompetitionStats {
        child_competitions: count(Category::Child),
        adult_individual_competitions: count(Category::AdultIndividual),
        adult_group_competitions: count(Category::AdultGroup),
        available: true,
    }
}

pub async fn get_participants_with_competitions(
    backend: &dyn Backend,
) -> Result<Vec<ParticipantView>> {
    let participants = backend
        .list_participants()
        .await
        .map_err(StorageError::Read)?;

    if participants.is_empty() {
        return Ok(Vec::new());
    }

    let competitions = backend
        .list_competitions()
        .await
        .map_err(StorageError::Read)?;
    let rows = backend
        .list_participant_competitions()
        .await
        .map_err(StorageError::Read)?;

    Ok(project_participants(&participants, &rows, &competitions))
}

pub async fn get_participant_count(backend: &dyn Backend) -> Result<i64> {
    backend
        .count_participants()
        .await
        .map_err(StorageError::Read)
}

/// Never fails: a backend error yields zero counts flagged as unavailable
pub async fn get_competition_stats(backend: &dyn Backend) -> CompetitionStats {
    let rows = match backend.list_participant_competitions().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Competition stats unavailable, reporting zeros");
            return CompetitionStats::unavailable();
        }
    };

    if rows.is_empty() {
        return CompetitionStats {
            available: true,
            ..CompetitionStats::default()
        };
    }

    match backend.list_competitions().await {
        Ok(competitions) => competition_stats(&rows, &competitions),
        Err(e) => {
            tracing::warn!(error = %e, "Competition stats unavailable, reporting zeros");
            CompetitionStats::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::backend::MockBackend;
    use crate::catalog;
    use crate::error::BackendError;

    fn participant(minutes_ago: i64) -> Participant {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Participant {
            id: Uuid::new_v4(),
            block: "C".to_string(),
            house_number: "7".to_string(),
            registration_date: at,
            created_at: at,
        }
    }

    fn row(participant: &Participant, competition: &Competition, name: &str) -> ParticipantCompetition {
        ParticipantCompetition {
            id: Uuid::new_v4(),
            participant_id: participant.id,
            competition_id: competition.id,
            participant_name: name.to_string(),
            participant_age: Some(8),
            additional_participant_name: None,
            additional_participant_age: None,
            group_members: None,
            created_at: Utc::now(),
        }
    }

    fn find<'a>(competitions: &'a [Competition], name: &str) -> &'a Competition {
        competitions.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_first_row_wins_within_category() {
        let competitions = catalog::default_competitions();
        let p = participant(0);
        let rows = vec![
            row(&p, find(&competitions, "Lomba Bendera"), "Budi"),
            row(&p, find(&competitions, "Lomba Kelereng"), "Sari"),
        ];

        let views = project_participants(&[p], &rows, &competitions);

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].child_competitions, vec!["lomba-bendera", "lomba-kelereng"]);
        assert_eq!(views[0].child_participant1_name, "Budi");
        assert_eq!(views[0].child_participant1_age, "8");
    }

    #[test]
    fn test_categories_fill_independently() {
        let competitions = catalog::default_competitions();
        let p = participant(0);
        let mut group = row(&p, find(&competitions, "Lomba Joget Balon"), "Tim Kelompok");
        group.group_members = Some("Ani\nBudi".to_string());
        group.participant_age = None;
        let mut adult = row(&p, find(&competitions, "Lomba Balap Karung"), "Pak Joko");
        adult.additional_participant_name = Some("Bu Rina".to_string());

        let views = project_participants(&[p], &[group, adult], &competitions);

        let view = &views[0];
        assert_eq!(view.adult_group_competitions, vec!["lomba-joget-balon"]);
        assert_eq!(view.group_members, "Ani\nBudi");
        assert_eq!(view.adult_individual_competitions, vec!["lomba-balap-karung"]);
        assert_eq!(view.adult_participant1_name, "Pak Joko");
        assert_eq!(view.adult_participant2_name, "Bu Rina");
        assert!(view.child_competitions.is_empty());
        assert_eq!(view.child_participant1_name, "");
    }

    #[test]
    fn test_orders_newest_first() {
        let competitions = catalog::default_competitions();
        let older = participant(10);
        let newer = participant(1);

        let views = project_participants(&[older.clone(), newer.clone()], &[], &competitions);

        assert_eq!(views[0].id, newer.id);
        assert_eq!(views[1].id, older.id);
    }

    #[test]
    fn test_skips_unmapped_and_unknown_competitions() {
        let mut competitions = catalog::default_competitions();
        let tambang = Competition {
            id: Uuid::new_v4(),
            name: "Lomba Tarik Tambang".to_string(),
            ..competitions[0].clone()
        };
        competitions.push(tambang.clone());
        let p = participant(0);
        let mut orphan = row(&p, find(&competitions, "Lomba Bendera"), "Budi");
        orphan.competition_id = Uuid::new_v4();
        let rows = vec![row(&p, &tambang, "Budi"), orphan];

        let views = project_participants(&[p], &rows, &competitions);

        assert!(views[0].child_competitions.is_empty());
        assert_eq!(views[0].child_participant1_name, "");
        assert_eq!(competition_stats(&rows, &competitions).child_competitions, 0);
    }

    #[test]
    fn test_stats_count_distinct_competitions() {
        let competitions = catalog::default_competitions();
        let karung = find(&competitions, "Lomba Balap Karung");
        let first = participant(2);
        let second = participant(1);
        let rows = vec![
            row(&first, karung, "Pak Joko"),
            row(&second, karung, "Bu Rina"),
            row(&second, find(&competitions, "Lomba Bendera"), "Budi"),
        ];

        let stats = competition_stats(&rows, &competitions);

        assert_eq!(stats.adult_individual_competitions, 1);
        assert_eq!(stats.child_competitions, 1);
        assert_eq!(stats.adult_group_competitions, 0);
        assert!(stats.available);
    }

    #[tokio::test]
    async fn test_stats_degrade_to_zero_on_read_failure() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_participant_competitions()
            .returning(|| Err(BackendError::Unavailable("down".to_string())));

        let stats = get_competition_stats(&backend).await;

        assert_eq!(stats, CompetitionStats::unavailable());
        assert!(!stats.available);
    }

    #[tokio::test]
    async fn test_projection_propagates_read_failure() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_participants()
            .returning(|| Ok(vec![participant(0)]));
        backend
            .expect_list_competitions()
            .returning(|| Err(BackendError::Unavailable("down".to_string())));

        let result = get_participants_with_competitions(&backend).await;

        assert!(result.unwrap_err().is_read());
    }

    #[tokio::test]
    async fn test_projection_of_no_participants_reads_nothing_else() {
        let mut backend = MockBackend::new();
        backend.expect_list_participants().returning(|| Ok(Vec::new()));

        let views = get_participants_with_competitions(&backend).await.unwrap();

        assert!(views.is_empty());
    }
}
