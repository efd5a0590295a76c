//! Portfolio value chart data.

pub mod demo;
pub mod loader;

use crate::portfolio::store::HistoryPoint;

/// Series and axis bounds ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// (index, value) points in chronological order
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// First and last history dates, when known
    pub date_range: Option<(String, String)>,
}

impl ChartData {
    /// Build chart data from recorded history points
    pub fn from_history(history: &[HistoryPoint]) -> Self {
        let values: Vec<f64> = history.iter().map(|h| h.value).collect();
        let date_range = match (history.first(), history.last()) {
            (Some(first), Some(last)) => Some((first.date.clone(), last.date.clone())),
            _ => None,
        };
        Self::from_values(&values, date_range)
    }

    /// Build chart data from a bare value series
    pub fn from_values(values: &[f64], date_range: Option<(String, String)>) -> Self {
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();

        let x_max = (points.len().saturating_sub(1)) as f64;

        let y_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Pad the Y axis so the curve doesn't hug the frame
        let (y_lower, y_upper) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            let range = y_max - y_min;
            let pad = if range > 0.0 { range * 0.05 } else { y_max.abs().max(1.0) * 0.05 };
            (y_min - pad, y_max + pad)
        };

        Self {
            points,
            x_bounds: [0.0, x_max.max(1.0)],
            y_bounds: [y_lower, y_upper],
            date_range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Y axis labels: lower, mid, upper
    pub fn y_labels(&self) -> [String; 3] {
        let [lo, hi] = self.y_bounds;
        let mid = (lo + hi) / 2.0;
        [
            format!("${:.0}", lo),
            format!("${:.0}", mid),
            format!("${:.0}", hi),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_padded() {
        let data = ChartData::from_values(&[100.0, 110.0, 105.0], None);
        assert!(data.y_bounds[0] < 100.0);
        assert!(data.y_bounds[1] > 110.0);
        assert_eq!(data.x_bounds, [0.0, 2.0]);
    }

    #[test]
    fn flat_series_still_has_a_visible_band() {
        let data = ChartData::from_values(&[50.0, 50.0], None);
        assert!(data.y_bounds[0] < 50.0);
        assert!(data.y_bounds[1] > 50.0);
    }

    #[test]
    fn empty_series_has_sane_bounds() {
        let data = ChartData::from_values(&[], None);
        assert!(data.is_empty());
        assert_eq!(data.y_bounds, [0.0, 1.0]);
    }

    #[test]
    fn history_carries_date_range() {
        let history = vec![
            HistoryPoint { date: "2025-01-02".into(), value: 100.0 },
            HistoryPoint { date: "2025-01-03".into(), value: 101.0 },
        ];
        let data = ChartData::from_history(&history);
        assert_eq!(
            data.date_range,
            Some(("2025-01-02".into(), "2025-01-03".into()))
        );
    }
}
