use clap::Args;
use std::str::FromStr;

use crate::catalog;
use crate::models::{progress_percent, FoodItem, MealEntry, MealType};
use crate::state::AppState;

#[derive(Args)]
pub struct LogCommand {
    /// Food catalog id or search term
    pub food: String,

    /// Portion multiplier
    #[arg(long, short, default_value_t = 1.0)]
    pub quantity: f64,

    /// Meal type (breakfast, lunch, dinner, snack)
    #[arg(long = "type", short = 't', default_value = "snack")]
    pub meal_type: String,
}

impl LogCommand {
    pub fn run(&self, state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
        let meal_type = MealType::from_str(&self.meal_type)?;
        let food = resolve_food(&self.food)?;

        let entry = MealEntry::new(food.clone(), self.quantity, meal_type);
        println!("Logged: {}", entry);
        state.add_meal(entry);

        let log = state.today_log();
        let goals = &state.profile().goals;
        println!();
        println!(
            "Today: {} ({:.0}% of calorie goal)",
            log.total_nutrition,
            progress_percent(log.total_nutrition.calories, goals.daily_calories)
        );

        Ok(())
    }
}

/// Resolves a food argument: exact id first, then catalog search. Ambiguous
/// searches are an error listing the candidates.
fn resolve_food(query: &str) -> Result<&'static FoodItem, String> {
    if let Some(food) = catalog::find_by_id(query) {
        return Ok(food);
    }

    let matches = catalog::search(query);
    match matches.as_slice() {
        [] => Err(format!(
            "No food matching '{}'. Try `nutrilog search <query>`.",
            query
        )),
        [food] => Ok(food),
        candidates => {
            let names: Vec<String> = candidates
                .iter()
                .map(|food| format!("{} ({})", food.id, food.name))
                .collect();
            Err(format!(
                "'{}' matches several foods, use an id: {}",
                query,
                names.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_food_by_id() {
        let food = resolve_food("apple").unwrap();
        assert_eq!(food.name, "Apple");
    }

    #[test]
    fn test_resolve_food_by_unique_search() {
        let food = resolve_food("lentil").unwrap();
        assert_eq!(food.id, "lentil-soup");
    }

    #[test]
    fn test_resolve_food_ambiguous_lists_candidates() {
        let err = resolve_food("grilled").unwrap_err();
        assert!(err.contains("grilled-chicken"));
        assert!(err.contains("grilled-salmon"));
    }

    #[test]
    fn test_resolve_food_no_match() {
        let err = resolve_food("unobtainium").unwrap_err();
        assert!(err.contains("No food matching"));
    }
}
