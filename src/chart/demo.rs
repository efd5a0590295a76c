//! Synthetic value history for portfolios that carry no recorded history.
//!
//! The walk is seeded from the portfolio composition, so the same holdings
//! always produce the same curve and re-renders stay deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::portfolio::Position;

const DAYS: usize = 120;
const DAILY_DRIFT: f64 = 0.0004;
const DAILY_VOL: f64 = 0.009;

/// Generate a deterministic value walk ending at the portfolio's current value
pub fn synthetic_history(positions: &[Position]) -> Vec<f64> {
    let end_value: f64 = positions.iter().map(Position::market_value).sum();
    if end_value <= 0.0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed_from(positions));

    // Walk forward from 1.0, then rescale so the last point equals end_value
    let mut factor = 1.0_f64;
    let mut factors = Vec::with_capacity(DAYS);
    for _ in 0..DAYS {
        let noise: f64 = rng.gen_range(-1.0..1.0);
        factor *= 1.0 + DAILY_DRIFT + noise * DAILY_VOL;
        factors.push(factor);
    }

    let last = factor;
    factors.iter().map(|f| f / last * end_value).collect()
}

fn seed_from(positions: &[Position]) -> u64 {
    let mut seed: u64 = 0x666f_6c69_6f00_0001;
    for p in positions {
        for b in p.symbol.bytes() {
            seed = seed.wrapping_mul(31).wrapping_add(b as u64);
        }
        seed = seed.wrapping_add(p.shares.to_bits());
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(symbol: &str, shares: f64, last: f64) -> Position {
        Position {
            symbol: symbol.to_string(),
            shares,
            cost_basis: last,
            last,
            prev_close: last,
        }
    }

    #[test]
    fn walk_is_deterministic() {
        let positions = vec![pos("AAPL", 10.0, 200.0), pos("MSFT", 5.0, 400.0)];
        assert_eq!(synthetic_history(&positions), synthetic_history(&positions));
    }

    #[test]
    fn walk_ends_at_current_value() {
        let positions = vec![pos("AAPL", 10.0, 200.0)];
        let series = synthetic_history(&positions);
        assert_eq!(series.len(), DAYS);
        let last = *series.last().unwrap();
        assert!((last - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn different_holdings_differ() {
        let a = synthetic_history(&[pos("AAPL", 10.0, 200.0)]);
        let b = synthetic_history(&[pos("MSFT", 10.0, 200.0)]);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_portfolio_has_no_history() {
        assert!(synthetic_history(&[]).is_empty());
    }
}
