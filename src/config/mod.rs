use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_refresh_secs() -> u64 {
    30
}

fn default_mover_threshold() -> f64 {
    5.0
}

fn default_notifications() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Portfolio file to load (defaults to portfolio.toml next to this config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_path: Option<PathBuf>,

    /// How often watch mode re-reads the portfolio, in seconds
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Absolute day-change percentage that makes a position a "big mover"
    #[serde(default = "default_mover_threshold")]
    pub mover_threshold_pct: f64,

    /// Show desktop notifications in watch mode
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            portfolio_path: None,
            refresh_secs: default_refresh_secs(),
            mover_threshold_pct: default_mover_threshold(),
            notifications: true,
        }
    }
}

impl AppConfig {
    /// Directory that holds config.toml and the default portfolio file
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("folio");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir)
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the portfolio file path, honoring an explicit override first
    pub fn portfolio_path(&self, cli_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(p) = cli_override {
            return Ok(p.clone());
        }
        if let Some(p) = &self.portfolio_path {
            return Ok(p.clone());
        }
        Ok(Self::config_dir()?.join("portfolio.toml"))
    }
}
