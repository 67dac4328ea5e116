use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod config;
mod identify;
mod models;
mod state;
mod storage;

use commands::{
    ConfigCommand, HistoryCommand, LogCommand, ProfileCommand, ScanCommand, SearchCommand,
    TodayCommand, WaterCommand,
};
use config::Config;
use state::AppState;
use storage::FileStore;

#[derive(Parser)]
#[command(name = "nutrilog")]
#[command(version)]
#[command(about = "A personal nutrition tracking CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a meal from the food catalog
    Log(LogCommand),

    /// Add water to today's log
    Water(WaterCommand),

    /// Show today's intake against your goals
    Today(TodayCommand),

    /// Show recent daily logs
    History(HistoryCommand),

    /// Search the food catalog
    Search(SearchCommand),

    /// Identify a food photo and log it
    Scan(ScanCommand),

    /// View or update your profile and goals
    Profile(ProfileCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrilog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Search(cmd)) => cmd.run(),
        Some(Commands::Config(cmd)) => cmd.run(&config),
        Some(command) => run_with_state(command, &config).await,
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

/// Runs a command that needs the application state: load it, run, then drain
/// queued persistence writes before exit.
async fn run_with_state(
    command: Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    let mut state = AppState::init(store).await;

    let result = match command {
        Commands::Log(cmd) => cmd.run(&mut state),
        Commands::Water(cmd) => cmd.run(&mut state, config),
        Commands::Today(cmd) => cmd.run(&state),
        Commands::History(cmd) => cmd.run(&state),
        Commands::Scan(cmd) => cmd.run(&mut state, config).await,
        Commands::Profile(cmd) => cmd.run(&mut state),
        // Handled without state in run()
        Commands::Search(_) | Commands::Config(_) => Ok(()),
    };

    state.shutdown().await;
    result
}
