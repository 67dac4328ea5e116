use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted daily logs and profile
    pub data_dir: PathBuf,
    /// Endpoint of the photo identification service, if configured
    pub identify_url: Option<String>,
    /// Water added per `nutrilog water` call when no amount is given (ml)
    pub water_serving_ml: f64,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: home.join(".nutrilog"),
            identify_url: None,
            water_serving_ml: 250.0,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Ok(data_dir) = std::env::var("NUTRILOG_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(url) = std::env::var("NUTRILOG_IDENTIFY_URL") {
            config.identify_url = Some(url);
        }
        if let Ok(serving) = std::env::var("NUTRILOG_WATER_SERVING_ML") {
            if let Ok(ml) = serving.parse::<f64>() {
                config.water_serving_ml = ml;
            }
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/nutrilog/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("nutrilog").join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
