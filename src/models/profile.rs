use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Lose,
    Maintain,
    Gain,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: male, female, other",
                s
            )),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!(
                "Invalid activity level '{}'. Valid options: sedentary, light, moderate, active, very_active",
                s
            )),
        }
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" => Ok(GoalType::Lose),
            "maintain" => Ok(GoalType::Maintain),
            "gain" => Ok(GoalType::Gain),
            _ => Err(format!(
                "Invalid goal type '{}'. Valid options: lose, maintain, gain",
                s
            )),
        }
    }
}

/// Daily targets used as denominators for progress percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    pub daily_calories: f64,
    pub daily_protein: f64,
    pub daily_carbs: f64,
    pub daily_fat: f64,
    pub daily_water: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
}

impl Default for UserGoals {
    fn default() -> Self {
        Self {
            daily_calories: 2000.0,
            daily_protein: 150.0,
            daily_carbs: 200.0,
            daily_fat: 65.0,
            daily_water: 2500.0,
            weight_goal: None,
            goal_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    pub goals: UserGoals,
}

impl UserProfile {
    /// Profile used when nothing has been stored yet.
    pub fn seed() -> Self {
        Self {
            id: "1".to_string(),
            name: "User".to_string(),
            email: String::new(),
            age: None,
            weight: None,
            height: None,
            gender: None,
            activity_level: None,
            goals: UserGoals::default(),
        }
    }

    /// Shallow merge: supplied fields overwrite, absent fields are retained.
    /// A supplied `goals` replaces the whole goals object, no field-by-field
    /// merge.
    pub fn apply(mut self, update: ProfileUpdate) -> Self {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(level) = update.activity_level {
            self.activity_level = Some(level);
        }
        if let Some(goals) = update.goals {
            self.goals = goals;
        }
        self
    }
}

/// Partial profile update. Absent fields leave the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goals: Option<UserGoals>,
}

/// Progress toward a daily goal as a percentage clamped to [0, 100].
/// A zero or negative goal yields 0 rather than an undefined ratio.
pub fn progress_percent(consumed: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (consumed / goal * 100.0).clamp(0.0, 100.0)
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.email.is_empty() {
            writeln!(f, "Email: {}", self.email)?;
        }
        if let Some(age) = self.age {
            writeln!(f, "Age: {}", age)?;
        }
        if let Some(weight) = self.weight {
            writeln!(f, "Weight: {} kg", weight)?;
        }
        if let Some(height) = self.height {
            writeln!(f, "Height: {} cm", height)?;
        }
        writeln!(f, "\nDaily goals:")?;
        writeln!(f, "  Calories: {:.0} kcal", self.goals.daily_calories)?;
        writeln!(f, "  Protein:  {:.0} g", self.goals.daily_protein)?;
        writeln!(f, "  Carbs:    {:.0} g", self.goals.daily_carbs)?;
        writeln!(f, "  Fat:      {:.0} g", self.goals.daily_fat)?;
        writeln!(f, "  Water:    {:.0} ml", self.goals.daily_water)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_profile_defaults() {
        let profile = UserProfile::seed();
        assert_eq!(profile.id, "1");
        assert_eq!(profile.name, "User");
        assert_eq!(profile.goals.daily_calories, 2000.0);
        assert_eq!(profile.goals.daily_protein, 150.0);
        assert_eq!(profile.goals.daily_carbs, 200.0);
        assert_eq!(profile.goals.daily_fat, 65.0);
        assert_eq!(profile.goals.daily_water, 2500.0);
    }

    #[test]
    fn test_apply_retains_absent_fields() {
        let profile = UserProfile::seed().apply(ProfileUpdate {
            age: Some(30),
            ..Default::default()
        });

        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.name, "User");
        assert_eq!(profile.goals, UserGoals::default());
    }

    #[test]
    fn test_apply_replaces_goals_wholesale() {
        let profile = UserProfile::seed().apply(ProfileUpdate {
            name: Some("Ayşe".to_string()),
            goals: Some(UserGoals {
                daily_calories: 1800.0,
                daily_protein: 120.0,
                daily_carbs: 180.0,
                daily_fat: 60.0,
                daily_water: 2000.0,
                weight_goal: Some(65.0),
                goal_type: Some(GoalType::Lose),
            }),
            ..Default::default()
        });

        assert_eq!(profile.name, "Ayşe");
        assert_eq!(profile.goals.daily_calories, 1800.0);
        assert_eq!(profile.goals.goal_type, Some(GoalType::Lose));

        // A second goals update replaces everything, optional fields included.
        let profile = profile.apply(ProfileUpdate {
            goals: Some(UserGoals::default()),
            ..Default::default()
        });
        assert_eq!(profile.goals.weight_goal, None);
        assert_eq!(profile.goals.goal_type, None);
        assert_eq!(profile.name, "Ayşe");
    }

    #[test]
    fn test_progress_percent_clamps_to_100() {
        assert_eq!(progress_percent(2500.0, 2000.0), 100.0);
        assert_eq!(progress_percent(1000.0, 2000.0), 50.0);
        assert_eq!(progress_percent(0.0, 2000.0), 0.0);
    }

    #[test]
    fn test_progress_percent_guards_zero_goal() {
        assert_eq!(progress_percent(500.0, 0.0), 0.0);
        assert_eq!(progress_percent(500.0, -10.0), 0.0);
    }

    #[test]
    fn test_profile_json_roundtrip_with_optionals_absent() {
        let profile = UserProfile::seed();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("\"age\""));
        assert!(!json.contains("\"activityLevel\""));
        assert!(json.contains("\"dailyCalories\""));

        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_activity_level_wire_format() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"very_active\"");
    }
}
