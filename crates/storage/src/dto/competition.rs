use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Category;

/// Filter for the competition catalog
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionQuery {
    pub category: Option<Category>,
}

/// Distinct competitions with at least one entry, per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionStats {
    pub child_competitions: usize,
    pub adult_individual_competitions: usize,
    pub adult_group_competitions: usize,
    /// `false` when the counts are zeros substituted for a failed read
    pub available: bool,
}

impl CompetitionStats {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Entrants of every competition that has at least one, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRoster {
    pub child: Vec<RosterCompetition>,
    pub adult_individual: Vec<RosterCompetition>,
    pub adult_group: Vec<RosterCompetition>,
}

impl CompetitionRoster {
    pub fn category(&self, category: Category) -> &[RosterCompetition] {
        match category {
            Category::Child => &self.child,
            Category::AdultIndividual => &self.adult_individual,
            Category::AdultGroup => &self.adult_group,
        }
    }

    pub(crate) fn category_mut(&mut self, category: Category) -> &mut Vec<RosterCompetition> {
        match category {
            Category::Child => &mut self.child,
            Category::AdultIndividual => &mut self.adult_individual,
            Category::AdultGroup => &mut self.adult_group,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterCompetition {
    pub key: String,
    pub name: String,
    pub entrants: Vec<RosterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub participant_id: Uuid,
    pub block: String,
    pub house_number: String,
    /// Entrant names; for groups, one per non-blank member line
    pub names: Vec<String>,
}
