use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

use super::food::FoodItem;
use super::meal_type::MealType;

/// One recorded instance of eating a quantity of a food. Immutable once
/// created; identity is the generated id, never field equality, so two
/// entries with the same food and quantity are distinct ledger lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: Uuid,
    pub food_item: FoodItem,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
    pub meal_type: MealType,
}

impl MealEntry {
    pub fn new(food_item: FoodItem, quantity: f64, meal_type: MealType) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_item,
            quantity: sanitize_quantity(quantity),
            timestamp: Utc::now(),
            meal_type,
        }
    }
}

/// The aggregator trusts quantities to be finite and positive, so anything
/// else falls back to a single portion here.
fn sanitize_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 0.0 {
        quantity
    } else {
        warn!(quantity, "invalid quantity, defaulting to 1");
        1.0
    }
}

impl fmt::Display for MealEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} ({}) - {:.0} kcal",
            self.quantity,
            self.food_item.name,
            self.food_item.portion,
            self.food_item.nutrition.calories * self.quantity
        )
    }
}
