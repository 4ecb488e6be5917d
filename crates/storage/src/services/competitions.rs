use crate::backend::Backend;
use crate::catalog::{self, CatalogReport};
use crate::dto::competition::{CompetitionRoster, RosterCompetition, RosterEntry};
use crate::dto::participant::ParticipantView;
use crate::error::{Result, StorageError};
use crate::models::{Category, Competition};

use super::projection::get_participants_with_competitions;

/// List the catalog ordered by category then name, optionally for one category
pub async fn list_competitions(
    backend: &dyn Backend,
    category: Option<Category>,
) -> Result<Vec<Competition>> {
    let mut competitions = backend
        .list_competitions()
        .await
        .map_err(StorageError::Read)?;

    if let Some(category) = category {
        competitions.retain(|c| c.category == category);
    }
    competitions.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(competitions)
}

/// Names shown for an entrant of a category
fn entrant_names(view: &ParticipantView, category: Category) -> Vec<String> {
    match category {
        Category::Child => [&view.child_participant1_name, &view.child_participant2_name]
            .into_iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect(),
        Category::AdultIndividual => [&view.adult_participant1_name, &view.adult_participant2_name]
            .into_iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect(),
        Category::AdultGroup => view
            .group_members
            .lines()
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .map(String::from)
            .collect(),
    }
}

/// Groups projected views per competition, in order of first appearance
pub fn build_roster(views: &[ParticipantView]) -> CompetitionRoster {
    let mut roster = CompetitionRoster::default();

    for view in views {
        for category in Category::ALL {
            for key in view.competitions(category) {
                let competitions = roster.category_mut(category);
                let position = match competitions.iter().position(|c| &c.key == key) {
                    Some(position) => position,
                    None => {
                        competitions.push(RosterCompetition {
                            key: key.clone(),
                            name: catalog::name_for_key(key).unwrap_or(key.as_str()).to_string(),
                            entrants: Vec::new(),
                        });
                        competitions.len() - 1
                    }
                };

                competitions[position].entrants.push(RosterEntry {
                    participant_id: view.id,
                    block: view.block.clone(),
                    house_number: view.house_number.clone(),
                    names: entrant_names(view, category),
                });
            }
        }
    }

    roster
}

pub async fn get_competition_roster(backend: &dyn Backend) -> Result<CompetitionRoster> {
    let views = get_participants_with_competitions(backend).await?;
    Ok(build_roster(&views))
}

/// Compare the stored catalog against the key table
pub async fn reconcile_catalog(backend: &dyn Backend) -> Result<CatalogReport> {
    let competitions = backend
        .list_competitions()
        .await
        .map_err(StorageError::Read)?;
    let report = catalog::reconcile(&competitions);

    if !report.is_consistent() {
        tracing::warn!(
            unmapped = report.unmapped_competitions.len(),
            missing = report.missing_competitions.len(),
            slug_mismatches = report.slug_mismatches.len(),
            "Competition catalog drifted from the key table"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::Participant;

    fn view(block: &str) -> ParticipantView {
        let now = Utc::now();
        ParticipantView::from(&Participant {
            id: Uuid::new_v4(),
            block: block.to_string(),
            house_number: "1".to_string(),
            registration_date: now,
            created_at: now,
        })
    }

    #[test]
    fn test_roster_groups_entrants_per_competition() {
        let mut first = view("A");
        first.add_competition(Category::Child, "lomba-bendera");
        first.child_participant1_name = "Budi".to_string();
        first.child_participant2_name = "Sari".to_string();

        let mut second = view("B");
        second.add_competition(Category::Child, "lomba-kelereng");
        second.add_competition(Category::Child, "lomba-bendera");
        second.child_participant1_name = "Dewi".to_string();

        let roster = build_roster(&[first.clone(), second.clone()]);

        let child = roster.category(Category::Child);
        assert_eq!(child.len(), 2);
        assert_eq!(child[0].key, "lomba-bendera");
        assert_eq!(child[0].name, "Lomba Bendera");
        assert_eq!(child[0].entrants.len(), 2);
        assert_eq!(child[0].entrants[0].names, vec!["Budi", "Sari"]);
        assert_eq!(child[0].entrants[1].participant_id, second.id);
        assert_eq!(child[1].key, "lomba-kelereng");
        assert_eq!(child[1].entrants[0].names, vec!["Dewi"]);
        assert!(roster.adult_group.is_empty());
    }

    #[test]
    fn test_roster_splits_group_members() {
        let mut group = view("C");
        group.add_competition(Category::AdultGroup, "lomba-joget-balon");
        group.group_members = "Ani\n\n  Budi \nCiko\n".to_string();

        let roster = build_roster(&[group]);

        assert_eq!(
            roster.adult_group[0].entrants[0].names,
            vec!["Ani", "Budi", "Ciko"]
        );
    }
}
