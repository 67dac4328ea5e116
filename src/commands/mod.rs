use clap::ValueEnum;

mod config_cmd;
mod history;
mod log_cmd;
mod profile_cmd;
mod scan;
mod search;
mod today;
mod water;

pub use config_cmd::ConfigCommand;
pub use history::HistoryCommand;
pub use log_cmd::LogCommand;
pub use profile_cmd::ProfileCommand;
pub use scan::ScanCommand;
pub use search::SearchCommand;
pub use today::TodayCommand;
pub use water::WaterCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
