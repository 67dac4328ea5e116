mod daily_log;
mod food;
mod meal_entry;
mod meal_type;
mod nutrition;
mod profile;

pub use daily_log::DailyLog;
pub use food::FoodItem;
pub use meal_entry::MealEntry;
pub use meal_type::MealType;
pub use nutrition::NutritionInfo;
pub use profile::{
    progress_percent, ActivityLevel, Gender, GoalType, ProfileUpdate, UserGoals, UserProfile,
};
