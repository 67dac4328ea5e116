use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal_entry::MealEntry;
use super::nutrition::NutritionInfo;

/// The nutrition and water ledger for one calendar date.
///
/// `total_nutrition` is always the aggregate of `meals`; it is recomputed on
/// every meal mutation and never set independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    pub meals: Vec<MealEntry>,
    pub total_nutrition: NutritionInfo,
    pub water_intake: f64,
}

impl DailyLog {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            total_nutrition: NutritionInfo::zero(),
            water_intake: 0.0,
        }
    }

    /// Appends a meal entry and recomputes the nutrition total over the full
    /// updated list.
    pub fn with_meal(mut self, entry: MealEntry) -> Self {
        self.meals.push(entry);
        self.total_nutrition = NutritionInfo::aggregate(&self.meals);
        self
    }

    /// Adds to the water intake. Strictly additive, never an overwrite.
    pub fn with_water(mut self, amount_ml: f64) -> Self {
        self.water_intake += amount_ml;
        self
    }
}

impl fmt::Display for DailyLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily log for {}", self.date)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "Total: {}", self.total_nutrition)?;
        writeln!(f, "Water: {:.0} ml", self.water_intake)?;

        if !self.meals.is_empty() {
            writeln!(f, "\nMeals:")?;
            for entry in &self.meals {
                writeln!(f, "  [{}] {}", entry.meal_type, entry)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, MealType};

    const EPSILON: f64 = 1e-9;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn banana() -> FoodItem {
        FoodItem::new(
            "banana",
            "Banana",
            "1 medium",
            NutritionInfo::new(105.0, 1.3, 27.0, 0.4).with_fiber(3.1),
            "fruit",
        )
    }

    #[test]
    fn test_empty_log_is_zeroed() {
        let log = DailyLog::empty(date());
        assert!(log.meals.is_empty());
        assert_eq!(log.total_nutrition, NutritionInfo::zero());
        assert_eq!(log.water_intake, 0.0);
    }

    #[test]
    fn test_with_meal_appends_last_and_recomputes_total() {
        let first = MealEntry::new(banana(), 1.0, MealType::Breakfast);
        let second = MealEntry::new(banana(), 2.0, MealType::Snack);
        let second_id = second.id;

        let log = DailyLog::empty(date()).with_meal(first).with_meal(second);

        assert_eq!(log.meals.len(), 2);
        assert_eq!(log.meals[1].id, second_id);
        assert!((log.total_nutrition.calories - 315.0).abs() < EPSILON);
        assert!((log.total_nutrition.fiber_grams() - 9.3).abs() < EPSILON);
    }

    #[test]
    fn test_with_water_accumulates() {
        let log = DailyLog::empty(date()).with_water(250.0).with_water(250.0);
        assert_eq!(log.water_intake, 500.0);
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let log = DailyLog::empty(date());
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"date\":\"2025-06-01\""));
        assert!(json.contains("\"totalNutrition\""));
        assert!(json.contains("\"waterIntake\""));

        let parsed: DailyLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }
}
