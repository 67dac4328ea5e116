use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

use crate::catalog;
use crate::config::Config;
use crate::identify::{FoodIdentifier, HttpIdentifier};
use crate::models::{MealEntry, MealType};
use crate::state::AppState;

#[derive(Args)]
pub struct ScanCommand {
    /// Path to a photo of the food
    pub image: PathBuf,

    /// Portion multiplier
    #[arg(long, short, default_value_t = 1.0)]
    pub quantity: f64,

    /// Meal type (breakfast, lunch, dinner, snack)
    #[arg(long = "type", short = 't', default_value = "lunch")]
    pub meal_type: String,
}

impl ScanCommand {
    pub async fn run(
        &self,
        state: &mut AppState,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let meal_type = MealType::from_str(&self.meal_type)?;
        let endpoint = config.identify_url.as_ref().ok_or(
            "No identification service configured. \
             Set identify_url in the config file or NUTRILOG_IDENTIFY_URL.",
        )?;

        let image = std::fs::read(&self.image)
            .map_err(|e| format!("Failed to read '{}': {}", self.image.display(), e))?;

        let identifier = HttpIdentifier::new(endpoint.as_str());
        let label = match identifier.identify(&image).await {
            Ok(label) => label,
            Err(e) => {
                // Identification failures are never fatal.
                println!("Could not identify the photo: {}", e);
                println!("Try logging manually: nutrilog search <query>");
                return Ok(());
            }
        };

        match catalog::find_by_label(&label) {
            Some(food) => {
                let entry = MealEntry::new(food.clone(), self.quantity, meal_type);
                println!("Identified: {}", food.name);
                println!("Logged: {}", entry);
                state.add_meal(entry);
            }
            None => {
                println!("Identified as '{}', but it is not in the catalog.", label);
                let candidates = catalog::search(&label);
                if candidates.is_empty() {
                    println!("Try logging manually: nutrilog search <query>");
                } else {
                    println!("Closest catalog matches:");
                    for food in candidates {
                        println!("  {:<16} {}", food.id, food);
                    }
                }
            }
        }

        Ok(())
    }
}
