use clap::Args;

use super::OutputFormat;
use crate::models::{progress_percent, DailyLog, MealType, UserGoals};
use crate::state::AppState;

#[derive(Args)]
pub struct TodayCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TodayCommand {
    pub fn run(&self, state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
        let log = state.today_log();
        let goals = &state.profile().goals;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&log)?);
            }
            OutputFormat::Text => {
                print_summary(&log, goals);
            }
        }

        Ok(())
    }
}

fn print_summary(log: &DailyLog, goals: &UserGoals) {
    println!("Daily Summary - {}", log.date);
    println!("{}", "=".repeat(30));

    let total = &log.total_nutrition;
    print_line("Calories", total.calories, goals.daily_calories, "kcal");
    print_line("Protein", total.protein, goals.daily_protein, "g");
    print_line("Carbs", total.carbs, goals.daily_carbs, "g");
    print_line("Fat", total.fat, goals.daily_fat, "g");
    if total.fiber_grams() > 0.0 {
        println!("Fiber:    {:.1} g", total.fiber_grams());
    }
    print_line("Water", log.water_intake, goals.daily_water, "ml");

    if log.meals.is_empty() {
        println!("\nNo meals logged yet.");
        return;
    }

    for meal_type in MealType::all() {
        let entries: Vec<_> = log
            .meals
            .iter()
            .filter(|entry| entry.meal_type == meal_type)
            .collect();
        if entries.is_empty() {
            continue;
        }
        println!("\n{}:", meal_type);
        for entry in entries {
            println!("  - {}", entry);
        }
    }
}

fn print_line(label: &str, consumed: f64, goal: f64, unit: &str) {
    println!(
        "{:<9}{:.0} / {:.0} {} ({:.0}%)",
        format!("{}:", label),
        consumed,
        goal,
        unit,
        progress_percent(consumed, goal)
    );
}
