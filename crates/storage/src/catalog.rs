//! Competition catalog lookups.
//!
//! The backend stores competitions by display name only. The form and the
//! views identify them by key, so both directions of the mapping live here:
//! the fixed display-name table used on reads, and the slug rule used on
//! writes.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Category, Competition};

/// Display name, key and category of every competition the site knows about
pub const COMPETITION_KEYS: &[(&str, &str, Category)] = &[
    ("Lomba Bendera", "lomba-bendera", Category::Child),
    ("Lomba Kelereng", "lomba-kelereng", Category::Child),
    ("Lomba Makan Kerupuk", "lomba-makan-kerupuk", Category::Child),
    ("Lomba Hias Sepeda (Karnaval)", "lomba-hias-sepeda", Category::Child),
    ("Lomba Balap Karung", "lomba-balap-karung", Category::AdultIndividual),
    (
        "Lomba Memecahkan Balon",
        "lomba-memecahkan-balon",
        Category::AdultIndividual,
    ),
    ("Lomba Joget Balon", "lomba-joget-balon", Category::AdultGroup),
    (
        "Lomba Memindahkan Tepung",
        "lomba-memindahkan-tepung",
        Category::AdultGroup,
    ),
];

/// Key for a stored competition name, if the name is in the table
pub fn key_for_name(name: &str) -> Option<&'static str> {
    COMPETITION_KEYS
        .iter()
        .find(|(display, _, _)| *display == name)
        .map(|(_, key, _)| *key)
}

/// Display name for a key, if the key is in the table
pub fn name_for_key(key: &str) -> Option<&'static str> {
    COMPETITION_KEYS
        .iter()
        .find(|(_, k, _)| *k == key)
        .map(|(display, _, _)| *display)
}

/// Derives the form key from a stored display name.
///
/// Lower-cases, turns every whitespace run into a single `-` and strips
/// parentheses, in that order.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c != '(' && c != ')' {
            slug.push(c);
        }
    }

    slug
}

/// The eight competitions as seeded by the initial migration
pub fn default_competitions() -> Vec<Competition> {
    let now = Utc::now();
    COMPETITION_KEYS
        .iter()
        .map(|(name, _, category)| Competition {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            category: *category,
            description: None,
            max_participants: None,
            created_at: now,
        })
        .collect()
}

/// A catalog entry resolved to the key the views use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCompetition<'a> {
    pub competition: &'a Competition,
    pub key: &'static str,
}

/// Why a participation row could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved<'a> {
    UnknownCompetition(Uuid),
    UnmappedName(&'a str),
}

/// Lookup structure built once per request from the competition list
pub struct CompetitionIndex<'a> {
    by_id: HashMap<Uuid, &'a Competition>,
    by_form_key: HashMap<String, Uuid>,
}

impl<'a> CompetitionIndex<'a> {
    pub fn new(competitions: &'a [Competition]) -> Self {
        let mut by_id = HashMap::with_capacity(competitions.len());
        let mut by_form_key = HashMap::with_capacity(competitions.len() * 2);

        for competition in competitions {
            by_id.insert(competition.id, competition);
            by_form_key
                .entry(slugify(&competition.name))
                .or_insert(competition.id);
            // The table key wins over the slug when both exist, since slugs
            // of names with qualifiers ("(Karnaval)") differ from the form key.
            if let Some(key) = key_for_name(&competition.name) {
                by_form_key.insert(key.to_string(), competition.id);
            }
        }

        Self { by_id, by_form_key }
    }

    /// Write path: competition id for a submitted form key
    pub fn id_for_form_key(&self, key: &str) -> Option<Uuid> {
        self.by_form_key.get(key).copied()
    }

    pub fn competition_for_form_key(&self, key: &str) -> Option<&'a Competition> {
        self.id_for_form_key(key).and_then(|id| self.get(&id))
    }

    pub fn get(&self, id: &Uuid) -> Option<&'a Competition> {
        self.by_id.get(id).copied()
    }

    /// Read path: id → competition → key via the display-name table
    pub fn resolve(&self, id: &Uuid) -> Result<ResolvedCompetition<'a>, Unresolved<'a>> {
        let competition = self.get(id).ok_or(Unresolved::UnknownCompetition(*id))?;
        let key = key_for_name(&competition.name)
            .ok_or(Unresolved::UnmappedName(competition.name.as_str()))?;

        Ok(ResolvedCompetition { competition, key })
    }
}

/// A table entry whose slug-derived key disagrees with its table key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlugMismatch {
    pub name: String,
    pub key: String,
    pub slug: String,
}

/// Result of checking the stored catalog against the key table
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    /// Stored competitions whose name is absent from the key table; their
    /// entries never show up in views or statistics
    pub unmapped_competitions: Vec<Competition>,
    /// Keys in the table with no stored competition of that name
    pub missing_competitions: Vec<String>,
    pub slug_mismatches: Vec<SlugMismatch>,
}

impl CatalogReport {
    pub fn is_consistent(&self) -> bool {
        self.unmapped_competitions.is_empty()
            && self.missing_competitions.is_empty()
            && self.slug_mismatches.is_empty()
    }
}

pub fn reconcile(competitions: &[Competition]) -> CatalogReport {
    let unmapped_competitions = competitions
        .iter()
        .filter(|c| key_for_name(&c.name).is_none())
        .cloned()
        .collect();

    let missing_competitions = COMPETITION_KEYS
        .iter()
        .filter(|(name, _, _)| !competitions.iter().any(|c| c.name == *name))
        .map(|(_, key, _)| (*key).to_string())
        .collect();

    let slug_mismatches = COMPETITION_KEYS
        .iter()
        .filter_map(|(name, key, _)| {
            let slug = slugify(name);
            (slug != *key).then(|| SlugMismatch {
                name: (*name).to_string(),
                key: (*key).to_string(),
                slug,
            })
        })
        .collect();

    CatalogReport {
        unmapped_competitions,
        missing_competitions,
        slug_mismatches,
    }
}
