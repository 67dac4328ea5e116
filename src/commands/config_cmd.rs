use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");
                        println!("Config file: {}", Config::default_config_path().display());
                        println!("data_dir: {}", config.data_dir.display());
                        match &config.identify_url {
                            Some(url) => println!("identify_url: {}", url),
                            None => println!("identify_url: (not configured)"),
                        }
                        println!("water_serving_ml: {:.0}", config.water_serving_ml);
                    }
                }
                Ok(())
            }
        }
    }
}
