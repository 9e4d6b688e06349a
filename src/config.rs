use crate::cli::ReportFormat;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub database_file: PathBuf,
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    #[serde(default)]
    pub report_format: ReportFormat,
}

fn default_color() -> bool {
    true
}

fn default_weight() -> f64 {
    crate::core::scoring::DEFAULT_WEIGHT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                database_file: Self::config_dir().join("bsc.db"),
                color: true,
                default_weight: default_weight(),
                report_format: ReportFormat::Table,
            },
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
        }
        Ok(())
    }

    /// Load from `config_path`, writing defaults there first if it is missing
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.database_file.as_os_str().is_empty() {
            return Err(AppError::Config("Database file cannot be empty".to_string()));
        }

        if !self.general.default_weight.is_finite() {
            return Err(AppError::Config(
                "Default weight must be a finite number".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;

        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scorecard")
    }

    pub fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
