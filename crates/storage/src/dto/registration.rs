use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Category;

pub const MIN_CHILD_AGE: i32 = 5;
pub const MAX_CHILD_AGE: i32 = 17;

/// Flat registration form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRequest {
    #[validate(length(max = 50, message = "Blok maksimal 50 karakter"))]
    pub block: String,

    #[validate(length(max = 50, message = "No Rumah maksimal 50 karakter"))]
    pub house_number: String,

    pub child_competitions: Vec<String>,

    #[validate(length(max = 255))]
    pub child_participant1_name: String,

    pub child_participant1_age: String,

    #[validate(length(max = 255))]
    pub child_participant2_name: String,

    pub child_participant2_age: String,

    pub adult_individual_competitions: Vec<String>,

    #[validate(length(max = 255))]
    pub adult_participant1_name: String,

    #[validate(length(max = 255))]
    pub adult_participant2_name: String,

    pub adult_group_competitions: Vec<String>,

    pub group_members: String,
}

/// Response returned after a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub participant_id: Uuid,
}

impl RegistrationRequest {
    /// Competition keys ticked for one category
    pub fn selections(&self, category: Category) -> &[String] {
        match category {
            Category::Child => &self.child_competitions,
            Category::AdultIndividual => &self.adult_individual_competitions,
            Category::AdultGroup => &self.adult_group_competitions,
        }
    }

    /// The field that must be filled for a category to produce any entry
    pub fn lead_field(&self, category: Category) -> &str {
        match category {
            Category::Child => &self.child_participant1_name,
            Category::AdultIndividual => &self.adult_participant1_name,
            Category::AdultGroup => &self.group_members,
        }
    }

    pub fn has_selections(&self) -> bool {
        Category::ALL
            .iter()
            .any(|category| !self.selections(*category).is_empty())
    }

    /// Field limits plus the rules spanning several fields.
    ///
    /// Nothing is sent to the backend unless this passes.
    pub fn validate_registration(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if is_blank(&self.block) {
            add_error(&mut errors, "block", "required", "Blok wajib diisi");
        }
        if is_blank(&self.house_number) {
            add_error(&mut errors, "house_number", "required", "No Rumah wajib diisi");
        }

        if !self.child_competitions.is_empty() {
            if is_blank(&self.child_participant1_name) {
                add_error(
                    &mut errors,
                    "child_participant1_name",
                    "required",
                    "Nama Peserta Anak 1 wajib diisi",
                );
            }

            if is_blank(&self.child_participant1_age) {
                add_error(
                    &mut errors,
                    "child_participant1_age",
                    "required",
                    "Umur Anak 1 wajib diisi",
                );
            } else if !is_child_age(&self.child_participant1_age) {
                add_error(
                    &mut errors,
                    "child_participant1_age",
                    "range",
                    "Umur anak harus antara 5-17 tahun",
                );
            }

            if !is_blank(&self.child_participant2_name) && is_blank(&self.child_participant2_age) {
                add_error(
                    &mut errors,
                    "child_participant2_age",
                    "required",
                    "Umur Anak 2 wajib diisi jika nama diisi",
                );
            } else if !is_blank(&self.child_participant2_age)
                && !is_child_age(&self.child_participant2_age)
            {
                add_error(
                    &mut errors,
                    "child_participant2_age",
                    "range",
                    "Umur anak harus antara 5-17 tahun",
                );
            }
        }

        if !self.adult_individual_competitions.is_empty()
            && is_blank(&self.adult_participant1_name)
        {
            add_error(
                &mut errors,
                "adult_participant1_name",
                "required",
                "Nama Peserta Dewasa 1 wajib diisi",
            );
        }

        if !self.adult_group_competitions.is_empty() && is_blank(&self.group_members) {
            add_error(
                &mut errors,
                "group_members",
                "required",
                "Daftar anggota kelompok wajib diisi",
            );
        }

        if !self.has_selections() {
            add_error(
                &mut errors,
                "child_competitions",
                "no_selection",
                "Pilih minimal satu kategori lomba",
            );
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parses a submitted age; empty or non-numeric input yields `None`
pub fn parse_age(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_child_age(value: &str) -> bool {
    parse_age(value).is_some_and(|age| (MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&age))
}

fn add_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &'static str,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    errors.add(field, error);
}
