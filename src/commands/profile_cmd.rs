use clap::{Args, Subcommand};
use std::str::FromStr;

use super::OutputFormat;
use crate::models::{ActivityLevel, Gender, GoalType, ProfileUpdate, UserGoals};
use crate::state::AppState;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the current profile and goals
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update profile fields (unset fields are left unchanged)
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// male, female or other
        #[arg(long)]
        gender: Option<String>,

        /// sedentary, light, moderate, active or very_active
        #[arg(long)]
        activity: Option<String>,
    },

    /// Update daily goals (unset fields keep their current value)
    Goals {
        /// Daily calorie target (kcal)
        #[arg(long)]
        calories: Option<f64>,

        /// Daily protein target (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Daily carbs target (g)
        #[arg(long)]
        carbs: Option<f64>,

        /// Daily fat target (g)
        #[arg(long)]
        fat: Option<f64>,

        /// Daily water target (ml)
        #[arg(long)]
        water: Option<f64>,

        /// Target weight (kg)
        #[arg(long)]
        weight_goal: Option<f64>,

        /// lose, maintain or gain
        #[arg(long)]
        goal_type: Option<String>,
    },
}

impl ProfileCommand {
    pub fn run(&self, state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(state.profile())?);
                    Ok(())
                }
                OutputFormat::Text => {
                    println!("{}", state.profile());
                    Ok(())
                }
            },
            ProfileSubcommand::Set {
                name,
                email,
                age,
                weight,
                height,
                gender,
                activity,
            } => {
                let update = ProfileUpdate {
                    name: name.clone(),
                    email: email.clone(),
                    age: *age,
                    weight: *weight,
                    height: *height,
                    gender: gender.as_deref().map(Gender::from_str).transpose()?,
                    activity_level: activity
                        .as_deref()
                        .map(ActivityLevel::from_str)
                        .transpose()?,
                    goals: None,
                };
                state.update_profile(update);
                println!("Profile updated.");
                Ok(())
            }
            ProfileSubcommand::Goals {
                calories,
                protein,
                carbs,
                fat,
                water,
                weight_goal,
                goal_type,
            } => {
                // The state layer replaces goals wholesale, so build a
                // complete goals object from the current one plus overrides.
                let mut goals = state.profile().goals.clone();
                if let Some(calories) = calories {
                    goals.daily_calories = *calories;
                }
                if let Some(protein) = protein {
                    goals.daily_protein = *protein;
                }
                if let Some(carbs) = carbs {
                    goals.daily_carbs = *carbs;
                }
                if let Some(fat) = fat {
                    goals.daily_fat = *fat;
                }
                if let Some(water) = water {
                    goals.daily_water = *water;
                }
                if let Some(weight_goal) = weight_goal {
                    goals.weight_goal = Some(*weight_goal);
                }
                if let Some(goal_type) = goal_type {
                    goals.goal_type = Some(GoalType::from_str(goal_type)?);
                }

                validate_goals(&goals)?;

                state.update_profile(ProfileUpdate {
                    goals: Some(goals),
                    ..Default::default()
                });
                println!("Goals updated.");
                Ok(())
            }
        }
    }
}

/// Goal values are denominators for progress percentages, so each daily
/// target must be strictly positive.
fn validate_goals(goals: &UserGoals) -> Result<(), String> {
    let targets = [
        ("calories", goals.daily_calories),
        ("protein", goals.daily_protein),
        ("carbs", goals.daily_carbs),
        ("fat", goals.daily_fat),
        ("water", goals.daily_water),
    ];
    for (name, value) in targets {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("Daily {} goal must be a positive number", name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_goals_accepts_defaults() {
        assert!(validate_goals(&UserGoals::default()).is_ok());
    }

    #[test]
    fn test_validate_goals_rejects_zero() {
        let goals = UserGoals {
            daily_water: 0.0,
            ..UserGoals::default()
        };
        let err = validate_goals(&goals).unwrap_err();
        assert!(err.contains("water"));
    }

    #[test]
    fn test_validate_goals_rejects_negative_and_nan() {
        let negative = UserGoals {
            daily_fat: -5.0,
            ..UserGoals::default()
        };
        assert!(validate_goals(&negative).is_err());

        let nan = UserGoals {
            daily_calories: f64::NAN,
            ..UserGoals::default()
        };
        assert!(validate_goals(&nan).is_err());
    }
}
