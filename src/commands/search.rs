use clap::Args;

use super::OutputFormat;
use crate::catalog;

#[derive(Args)]
pub struct SearchCommand {
    /// Search term, matched against food names and localized names
    pub query: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SearchCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let results = catalog::search(&self.query);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Text => {
                if results.is_empty() {
                    println!("No foods matching '{}'.", self.query);
                    return Ok(());
                }
                for food in results {
                    println!("{:<16} {}", food.id, food);
                }
            }
        }

        Ok(())
    }
}
