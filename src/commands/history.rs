use chrono::{Duration, Local};
use clap::Args;

use super::OutputFormat;
use crate::models::DailyLog;
use crate::state::AppState;

#[derive(Args)]
pub struct HistoryCommand {
    /// Number of days to show, counting back from today
    #[arg(long, short, default_value_t = 7)]
    pub days: i64,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl HistoryCommand {
    pub fn run(&self, state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
        let cutoff = Local::now().date_naive() - Duration::days(self.days.max(0));
        let logs: Vec<&DailyLog> = state.logs().filter(|log| log.date > cutoff).collect();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&logs)?);
            }
            OutputFormat::Text => {
                if logs.is_empty() {
                    println!("No logs in the last {} days.", self.days);
                    return Ok(());
                }
                for log in logs {
                    println!(
                        "{}  {:>5.0} kcal  {:>5.0} ml water  {} meal(s)",
                        log.date,
                        log.total_nutrition.calories,
                        log.water_intake,
                        log.meals.len()
                    );
                }
            }
        }

        Ok(())
    }
}
