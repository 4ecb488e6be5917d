use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Category, Participant};

/// Denormalized participant assembled on every read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub id: Uuid,
    pub block: String,
    pub house_number: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,

    pub child_competitions: Vec<String>,
    pub child_participant1_name: String,
    pub child_participant1_age: String,
    pub child_participant2_name: String,
    pub child_participant2_age: String,

    pub adult_individual_competitions: Vec<String>,
    pub adult_participant1_name: String,
    pub adult_participant2_name: String,

    pub adult_group_competitions: Vec<String>,
    pub group_members: String,
}

impl ParticipantView {
    pub fn competitions(&self, category: Category) -> &[String] {
        match category {
            Category::Child => &self.child_competitions,
            Category::AdultIndividual => &self.adult_individual_competitions,
            Category::AdultGroup => &self.adult_group_competitions,
        }
    }

    /// Adds a key to a category's set, keeping first-appearance order
    pub(crate) fn add_competition(&mut self, category: Category, key: &str) {
        let keys = match category {
            Category::Child => &mut self.child_competitions,
            Category::AdultIndividual => &mut self.adult_individual_competitions,
            Category::AdultGroup => &mut self.adult_group_competitions,
        };
        if !keys.iter().any(|existing| existing == key) {
            keys.push(key.to_string());
        }
    }

    /// The field whose emptiness decides whether a row may still fill the category
    pub fn lead_field(&self, category: Category) -> &str {
        match category {
            Category::Child => &self.child_participant1_name,
            Category::AdultIndividual => &self.adult_participant1_name,
            Category::AdultGroup => &self.group_members,
        }
    }
}

impl From<&Participant> for ParticipantView {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            block: participant.block.clone(),
            house_number: participant.house_number.clone(),
            registration_date: participant.registration_date,
            created_at: participant.created_at,
            child_competitions: Vec::new(),
            child_participant1_name: String::new(),
            child_participant1_age: String::new(),
            child_participant2_name: String::new(),
            child_participant2_age: String::new(),
            adult_individual_competitions: Vec::new(),
            adult_participant1_name: String::new(),
            adult_participant2_name: String::new(),
            adult_group_competitions: Vec::new(),
            group_members: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantCountResponse {
    pub count: i64,
}
