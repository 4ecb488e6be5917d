use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Participation class of a competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Child,
    AdultIndividual,
    AdultGroup,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Child,
        Category::AdultIndividual,
        Category::AdultGroup,
    ];

    /// Value stored in the `competitions.category` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Child => "child",
            Category::AdultIndividual => "adult_individual",
            Category::AdultGroup => "adult_group",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown competition category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child" => Ok(Category::Child),
            "adult_individual" => Ok(Category::AdultIndividual),
            "adult_group" => Ok(Category::AdultGroup),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
