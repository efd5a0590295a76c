//! Portfolio file loading.
//!
//! The portfolio lives in a TOML file, by default next to the app config.
//! A missing file is seeded with a demo portfolio so the dashboard renders
//! out of the box; a malformed file is a hard error surfaced to the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::Position;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read portfolio file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse portfolio file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize portfolio: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("portfolio file has no positions")]
    Empty,
}

/// One point of the portfolio value history used by the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub value: f64,
}

/// On-disk portfolio document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioFile {
    #[serde(default)]
    pub positions: Vec<Position>,

    /// Optional recorded value history; synthesized when absent
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

/// Load a portfolio document, seeding a demo file if none exists
pub fn load_or_seed(path: &Path) -> Result<PortfolioFile, StoreError> {
    if !path.exists() {
        tracing::info!("No portfolio at {}, writing demo portfolio", path.display());
        let demo = demo_portfolio();
        if let Err(e) = save(path, &demo) {
            tracing::warn!("Could not write demo portfolio: {}", e);
        }
        return Ok(demo);
    }

    load(path)
}

/// Load a portfolio document from an existing file
pub fn load(path: &Path) -> Result<PortfolioFile, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let file: PortfolioFile = toml::from_str(&content)?;

    if file.positions.is_empty() {
        return Err(StoreError::Empty);
    }

    Ok(file)
}

pub fn save(path: &Path, file: &PortfolioFile) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(file)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Built-in demo holdings used on first run
pub fn demo_portfolio() -> PortfolioFile {
    PortfolioFile {
        positions: vec![
            Position {
                symbol: "AAPL".into(),
                shares: 25.0,
                cost_basis: 168.40,
                last: 229.35,
                prev_close: 226.78,
            },
            Position {
                symbol: "MSFT".into(),
                shares: 12.0,
                cost_basis: 310.12,
                last: 421.80,
                prev_close: 425.12,
            },
            Position {
                symbol: "NVDA".into(),
                shares: 18.0,
                cost_basis: 94.55,
                last: 172.41,
                prev_close: 165.93,
            },
            Position {
                symbol: "VTI".into(),
                shares: 40.0,
                cost_basis: 221.03,
                last: 276.50,
                prev_close: 277.89,
            },
            Position {
                symbol: "KO".into(),
                shares: 60.0,
                cost_basis: 58.22,
                last: 69.14,
                prev_close: 69.14,
            },
        ],
        history: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_portfolio_round_trips() {
        let demo = demo_portfolio();
        let serialized = toml::to_string_pretty(&demo).unwrap();
        let parsed: PortfolioFile = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.positions.len(), demo.positions.len());
        assert_eq!(parsed.positions[0].symbol, "AAPL");
    }

    #[test]
    fn empty_positions_is_an_error() {
        let dir = std::env::temp_dir().join("folio-store-test-empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("portfolio.toml");
        std::fs::write(&path, "history = []\n").unwrap();

        match load(&path) {
            Err(StoreError::Empty) => {}
            other => panic!("expected Empty error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join("folio-store-test-parse");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("portfolio.toml");
        std::fs::write(&path, "positions = \"nope\"").unwrap();

        assert!(matches!(load(&path), Err(StoreError::Parse(_))));
    }

    #[test]
    fn missing_file_is_seeded() {
        let dir = std::env::temp_dir().join("folio-store-test-seed");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("portfolio.toml");

        let file = load_or_seed(&path).unwrap();
        assert!(!file.positions.is_empty());
        assert!(path.exists());
    }
}
