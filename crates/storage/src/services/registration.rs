use uuid::Uuid;

use crate::backend::Backend;
use crate::catalog::CompetitionIndex;
use crate::dto::registration::{RegistrationRequest, parse_age};
use crate::error::{Result, StorageError};
use crate::models::{Category, NewParticipant, NewParticipantCompetition};

/// Stored as `participant_name` on group entries, which have no lead person
pub const GROUP_PARTICIPANT_NAME: &str = "Tim Kelompok";

/// Builds the participation rows a submission produces.
///
/// A category contributes only when it has selections and its lead field is
/// filled. Every key in the category repeats the same submitted names, ages
/// and member list. Keys that match no stored competition, or whose
/// competition belongs to another category, are skipped.
pub fn plan_participations(
    request: &RegistrationRequest,
    participant_id: Uuid,
    index: &CompetitionIndex<'_>,
) -> Vec<NewParticipantCompetition> {
    let mut rows = Vec::new();

    for category in Category::ALL {
        let selections = request.selections(category);
        if selections.is_empty() || request.lead_field(category).is_empty() {
            continue;
        }

        let mut seen: Vec<&str> = Vec::with_capacity(selections.len());
        for key in selections {
            if seen.contains(&key.as_str()) {
                continue;
            }
            seen.push(key);

            let Some(competition) = index.competition_for_form_key(key) else {
                tracing::warn!(key = %key, category = %category, "No competition matches form key, skipping");
                continue;
            };
            if competition.category != category {
                tracing::warn!(
                    key = %key,
                    category = %category,
                    competition_category = %competition.category,
                    "Form key submitted under another category, skipping"
                );
                continue;
            }

            rows.push(participation_row(
                request,
                category,
                participant_id,
                competition.id,
            ));
        }
    }

    rows
}

fn participation_row(
    request: &RegistrationRequest,
    category: Category,
    participant_id: Uuid,
    competition_id: Uuid,
) -> NewParticipantCompetition {
    let mut row = NewParticipantCompetition {
        id: Uuid::new_v4(),
        participant_id,
        competition_id,
        participant_name: String::new(),
        participant_age: None,
        additional_participant_name: None,
        additional_participant_age: None,
        group_members: None,
    };

    match category {
        Category::Child => {
            row.participant_name = request.child_participant1_name.clone();
            row.participant_age = parse_age(&request.child_participant1_age);
            row.additional_participant_name = non_empty(&request.child_participant2_name);
            row.additional_participant_age = parse_age(&request.child_participant2_age);
        }
        Category::AdultIndividual => {
            row.participant_name = request.adult_participant1_name.clone();
            row.additional_participant_name = non_empty(&request.adult_participant2_name);
        }
        Category::AdultGroup => {
            row.participant_name = GROUP_PARTICIPANT_NAME.to_string();
            row.group_members = Some(request.group_members.clone());
        }
    }

    row
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Registers one household and its competition entries.
///
/// Validation runs before any backend call. The catalog is read next, then
/// the participant is written, then its entries. Returns the new participant id.
pub async fn register_participant(
    backend: &dyn Backend,
    request: &RegistrationRequest,
) -> Result<Uuid> {
    request.validate_registration()?;

    let competitions = backend
        .list_competitions()
        .await
        .map_err(StorageError::Read)?;
    let index = CompetitionIndex::new(&competitions);

    let participant = NewParticipant::new(&request.block, &request.house_number);
    let rows = plan_participations(request, participant.id, &index);

    let created = backend
        .insert_registration(&participant, &rows)
        .await
        .map_err(|e| {
            tracing::error!(participant_id = %participant.id, error = %e, "Registration write failed");
            StorageError::Write(e)
        })?;

    tracing::info!(
        participant_id = %created.id,
        block = %created.block,
        house_number = %created.house_number,
        entries = rows.len(),
        "Participant registered"
    );

    Ok(created.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::catalog;
    use crate::error::BackendError;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            block: "A".to_string(),
            house_number: "12".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_child_rows_share_submitted_fields() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let participant_id = Uuid::new_v4();
        let request = RegistrationRequest {
            child_competitions: vec!["lomba-bendera".to_string(), "lomba-kelereng".to_string()],
            child_participant1_name: "Budi".to_string(),
            child_participant1_age: "9".to_string(),
            child_participant2_name: "Sari".to_string(),
            child_participant2_age: "7".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, participant_id, &index);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.participant_id, participant_id);
            assert_eq!(row.participant_name, "Budi");
            assert_eq!(row.participant_age, Some(9));
            assert_eq!(row.additional_participant_name.as_deref(), Some("Sari"));
            assert_eq!(row.additional_participant_age, Some(7));
            assert_eq!(row.group_members, None);
        }
        assert_eq!(
            rows[0].competition_id,
            index.id_for_form_key("lomba-bendera").unwrap()
        );
        assert_eq!(
            rows[1].competition_id,
            index.id_for_form_key("lomba-kelereng").unwrap()
        );
    }

    #[test]
    fn test_plan_group_row() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let request = RegistrationRequest {
            adult_group_competitions: vec!["lomba-joget-balon".to_string()],
            group_members: "Ani\nBudi\nCiko".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, Uuid::new_v4(), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_name, GROUP_PARTICIPANT_NAME);
        assert_eq!(rows[0].group_members.as_deref(), Some("Ani\nBudi\nCiko"));
        assert_eq!(rows[0].participant_age, None);
    }

    #[test]
    fn test_plan_adult_individual_carries_no_ages() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let request = RegistrationRequest {
            adult_individual_competitions: vec!["lomba-balap-karung".to_string()],
            adult_participant1_name: "Pak Joko".to_string(),
            // child fields are ignored without child selections
            child_participant1_age: "9".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, Uuid::new_v4(), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_name, "Pak Joko");
        assert_eq!(rows[0].participant_age, None);
        assert_eq!(rows[0].additional_participant_name, None);
    }

    #[test]
    fn test_plan_skips_category_without_lead_field() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let request = RegistrationRequest {
            child_competitions: vec!["lomba-bendera".to_string()],
            adult_group_competitions: vec!["lomba-joget-balon".to_string()],
            group_members: "Ani".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, Uuid::new_v4(), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group_members.as_deref(), Some("Ani"));
    }

    #[test]
    fn test_plan_skips_unknown_and_duplicate_keys() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let request = RegistrationRequest {
            child_competitions: vec![
                "lomba-bendera".to_string(),
                "lomba-panjat-pinang".to_string(),
                "lomba-bendera".to_string(),
            ],
            child_participant1_name: "Budi".to_string(),
            child_participant1_age: "9".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, Uuid::new_v4(), &index);

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_plan_skips_key_from_another_category() {
        let competitions = catalog::default_competitions();
        let index = CompetitionIndex::new(&competitions);
        let request = RegistrationRequest {
            adult_individual_competitions: vec![
                "lomba-bendera".to_string(),
                "lomba-balap-karung".to_string(),
            ],
            adult_participant1_name: "Pak Joko".to_string(),
            ..request()
        };

        let rows = plan_participations(&request, Uuid::new_v4(), &index);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].competition_id,
            index.id_for_form_key("lomba-balap-karung").unwrap()
        );
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_backend_call() {
        // No expectations: any call on the mock panics.
        let backend = MockBackend::new();

        let result = register_participant(&backend, &request()).await;

        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_a_read_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_competitions()
            .times(1)
            .returning(|| Err(BackendError::Unavailable("down".to_string())));

        let request = RegistrationRequest {
            adult_group_competitions: vec!["lomba-joget-balon".to_string()],
            group_members: "Ani".to_string(),
            ..request()
        };
        let result = register_participant(&backend, &request).await;

        assert!(result.unwrap_err().is_read());
    }

    #[tokio::test]
    async fn test_insert_failure_is_a_write_error() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_competitions()
            .returning(|| Ok(catalog::default_competitions()));
        backend
            .expect_insert_registration()
            .times(1)
            .returning(|_, _| Err(BackendError::Unavailable("down".to_string())));

        let request = RegistrationRequest {
            adult_group_competitions: vec!["lomba-joget-balon".to_string()],
            group_members: "Ani".to_string(),
            ..request()
        };
        let result = register_participant(&backend, &request).await;

        assert!(result.unwrap_err().is_write());
    }
}
