use clap::Args;

use crate::config::Config;
use crate::models::progress_percent;
use crate::state::AppState;

#[derive(Args)]
pub struct WaterCommand {
    /// Amount in milliliters (defaults to the configured serving size)
    pub amount_ml: Option<f64>,
}

impl WaterCommand {
    pub fn run(
        &self,
        state: &mut AppState,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let amount = self.amount_ml.unwrap_or(config.water_serving_ml);

        if !state.add_water(amount) {
            return Err("Water amount must be a positive number of milliliters".into());
        }

        let log = state.today_log();
        let goal = state.profile().goals.daily_water;
        println!(
            "Added {:.0} ml. Today: {:.0} / {:.0} ml ({:.0}%)",
            amount,
            log.water_intake,
            goal,
            progress_percent(log.water_intake, goal)
        );

        Ok(())
    }
}
