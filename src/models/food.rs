use serde::{Deserialize, Serialize};
use std::fmt;

use super::nutrition::NutritionInfo;

/// Immutable reference data describing one portion of a food. Owned by the
/// catalog; meal entries embed a snapshot and never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    pub portion: String,
    pub nutrition: NutritionInfo,
    pub category: String,
}

impl FoodItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        portion: impl Into<String>,
        nutrition: NutritionInfo,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            localized_name: None,
            portion: portion.into(),
            nutrition,
            category: category.into(),
        }
    }

    pub fn with_localized_name(mut self, name: impl Into<String>) -> Self {
        self.localized_name = Some(name.into());
        self
    }

    /// Case-insensitive substring match against the name or localized name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.name.to_lowercase().contains(&query) {
            return true;
        }
        self.localized_name
            .as_ref()
            .is_some_and(|name| name.to_lowercase().contains(&query))
    }

    /// Exact name match, used to resolve identification labels.
    pub fn matches_label(&self, label: &str) -> bool {
        if self.name.eq_ignore_ascii_case(label) {
            return true;
        }
        self.localized_name
            .as_ref()
            .is_some_and(|name| name.eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.portion)?;
        if let Some(localized) = &self.localized_name {
            write!(f, " [{}]", localized)?;
        }
        write!(f, " - {}", self.nutrition)
    }
}
