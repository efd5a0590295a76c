//! Headless portfolio watcher.
//!
//! Periodically re-reads the portfolio file, logs the snapshot, and raises a
//! desktop notification the first time a position's day move crosses the
//! configured threshold. Runs until interrupted; never touches the terminal
//! UI or the chart loader.

use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

use crate::config::AppConfig;
use crate::portfolio::{store, Position, Snapshot};

/// Start the watch loop with the given portfolio override
pub async fn start_watching(cli_portfolio: Option<PathBuf>) -> Result<()> {
    let mut config = AppConfig::load()?;
    let mut ticker = interval(Duration::from_secs(config.refresh_secs.max(1)));

    // Notify once per symbol per run
    let mut notified: HashSet<String> = HashSet::new();

    tracing::info!("Starting folio watcher");

    loop {
        ticker.tick().await;

        // Reload config to pick up changes
        if let Ok(new_config) = AppConfig::load() {
            config = new_config;
        }

        let path = config.portfolio_path(cli_portfolio.as_ref())?;
        let file = match store::load_or_seed(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("Watch cycle failed to load portfolio: {}", e);
                continue;
            }
        };

        let snapshot = Snapshot::of(&file.positions);
        tracing::info!(
            "Portfolio ${:.2}, day {:+.2}%",
            snapshot.total_value,
            snapshot.day_change_pct
        );

        for mover in big_movers(&file.positions, config.mover_threshold_pct) {
            if notified.insert(mover.symbol.clone()) {
                tracing::info!(
                    "Big mover: {} {:+.2}%",
                    mover.symbol,
                    mover.day_change_pct()
                );
                if config.notifications {
                    notify_mover(mover);
                }
            }
        }
    }
}

/// Positions whose absolute day change meets the threshold
fn big_movers(positions: &[Position], threshold_pct: f64) -> Vec<&Position> {
    positions
        .iter()
        .filter(|p| p.day_change_pct().abs() >= threshold_pct)
        .collect()
}

fn notify_mover(position: &Position) {
    let direction = if position.is_gainer() { "up" } else { "down" };
    let body = format!(
        "{} is {} {:+.2}% today (${:.2})",
        position.symbol,
        direction,
        position.day_change_pct(),
        position.last
    );

    if let Err(e) = notify_rust::Notification::new()
        .summary("folio")
        .body(&body)
        .icon("office-chart-line")
        .show()
    {
        tracing::warn!("Desktop notification failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(symbol: &str, last: f64, prev_close: f64) -> Position {
        Position {
            symbol: symbol.to_string(),
            shares: 1.0,
            cost_basis: prev_close,
            last,
            prev_close,
        }
    }

    #[test]
    fn big_movers_respects_threshold() {
        let positions = vec![
            pos("CALM", 100.5, 100.0), // +0.5%
            pos("HOT", 110.0, 100.0),  // +10%
            pos("COLD", 89.0, 100.0),  // -11%
        ];

        let movers = big_movers(&positions, 5.0);
        let symbols: Vec<&str> = movers.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["HOT", "COLD"]);
    }

    #[test]
    fn zero_threshold_flags_everything_that_moved() {
        let positions = vec![pos("A", 100.1, 100.0), pos("B", 100.0, 100.0)];
        let movers = big_movers(&positions, 0.0);
        // B moved 0%, which still meets a 0% threshold
        assert_eq!(movers.len(), 2);
    }
}
