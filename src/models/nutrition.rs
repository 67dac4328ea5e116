use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal_entry::MealEntry;

/// Nutrition facts, either per portion (catalog data) or summed (daily totals).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

impl NutritionInfo {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber: None,
        }
    }

    pub fn with_fiber(mut self, fiber: f64) -> Self {
        self.fiber = Some(fiber);
        self
    }

    /// All-zero totals, the starting point of every fold and fresh daily log.
    pub fn zero() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: Some(0.0),
        }
    }

    /// Fiber with the absent-means-zero default resolved.
    pub fn fiber_grams(&self) -> f64 {
        self.fiber.unwrap_or(0.0)
    }

    /// Sums the nutrition of a sequence of meal entries, each scaled by its
    /// quantity. An empty sequence yields all-zero totals.
    pub fn aggregate<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MealEntry>,
    {
        entries.into_iter().fold(Self::zero(), |acc, entry| {
            let facts = &entry.food_item.nutrition;
            let qty = entry.quantity;
            Self {
                calories: acc.calories + facts.calories * qty,
                protein: acc.protein + facts.protein * qty,
                carbs: acc.carbs + facts.carbs * qty,
                fat: acc.fat + facts.fat * qty,
                fiber: Some(acc.fiber_grams() + facts.fiber_grams() * qty),
            }
        })
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
            self.calories, self.protein, self.carbs, self.fat
        )?;
        if let Some(fiber) = self.fiber {
            write!(f, ", {:.1}g fiber", fiber)?;
        }
        Ok(())
    }
}
