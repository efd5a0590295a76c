//! Portfolio domain model: positions, quick filters, and aggregate snapshots.

pub mod store;

use serde::{Deserialize, Serialize};

/// A single holding with its latest quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: f64,
    pub cost_basis: f64,
    /// Last traded price
    pub last: f64,
    /// Previous session close, used for day-change
    pub prev_close: f64,
}

impl Position {
    pub fn market_value(&self) -> f64 {
        self.shares * self.last
    }

    /// Day change as a percentage of the previous close
    pub fn day_change_pct(&self) -> f64 {
        if self.prev_close == 0.0 {
            return 0.0;
        }
        (self.last - self.prev_close) / self.prev_close * 100.0
    }

    pub fn day_change_value(&self) -> f64 {
        self.shares * (self.last - self.prev_close)
    }

    /// Unrealized profit/loss against cost basis
    pub fn unrealized_pnl(&self) -> f64 {
        self.shares * (self.last - self.cost_basis)
    }

    pub fn is_gainer(&self) -> bool {
        self.last > self.prev_close
    }

    pub fn is_loser(&self) -> bool {
        self.last < self.prev_close
    }
}

/// Quick-filter over the positions table.
///
/// The variants match the three fixed actions of the filter panel; flat
/// positions (unchanged on the day) only appear under `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Gainers,
    Losers,
}

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All Positions",
            Filter::Gainers => "Gainers",
            Filter::Losers => "Losers",
        }
    }

    pub fn matches(&self, position: &Position) -> bool {
        match self {
            Filter::All => true,
            Filter::Gainers => position.is_gainer(),
            Filter::Losers => position.is_loser(),
        }
    }

    /// Positions passing the filter, in their stored order
    pub fn apply<'a>(&self, positions: &'a [Position]) -> Vec<&'a Position> {
        positions.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Aggregate view of the whole portfolio
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub total_value: f64,
    pub day_change_value: f64,
    pub day_change_pct: f64,
    pub top_gainer: Option<(String, f64)>,
    pub top_loser: Option<(String, f64)>,
}

impl Snapshot {
    pub fn of(positions: &[Position]) -> Self {
        let total_value: f64 = positions.iter().map(Position::market_value).sum();
        let day_change_value: f64 = positions.iter().map(Position::day_change_value).sum();
        let prev_value = total_value - day_change_value;
        let day_change_pct = if prev_value != 0.0 {
            day_change_value / prev_value * 100.0
        } else {
            0.0
        };

        let top_gainer = positions
            .iter()
            .filter(|p| p.is_gainer())
            .max_by(|a, b| a.day_change_pct().total_cmp(&b.day_change_pct()))
            .map(|p| (p.symbol.clone(), p.day_change_pct()));

        let top_loser = positions
            .iter()
            .filter(|p| p.is_loser())
            .min_by(|a, b| a.day_change_pct().total_cmp(&b.day_change_pct()))
            .map(|p| (p.symbol.clone(), p.day_change_pct()));

        Self {
            total_value,
            day_change_value,
            day_change_pct,
            top_gainer,
            top_loser,
        }
    }
}
