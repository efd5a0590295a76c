//! Lazy chart materialization.
//!
//! The chart's data series is not built until the dashboard actually needs to
//! draw it. The first interactive draw spawns a tokio task that loads the
//! portfolio history (or synthesizes one) off the UI thread and hands the
//! finished [`ChartData`] back over an mpsc channel. Until then the UI renders
//! the placeholder state. Non-interactive paths (`--status`, `--watch`) never
//! construct a handle, so no chart work happens there.

use std::path::PathBuf;
use tokio::sync::mpsc;

use super::demo;
use super::ChartData;
use crate::portfolio::store;

/// Spinner frames advanced once per UI tick while the chart loads
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Text shown next to the spinner in the placeholder state
pub const LOADING_TEXT: &str = "Loading chart...";

/// What the chart area should render right now
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// Load task running; draw the spinner placeholder
    Pending,
    Ready(ChartData),
    /// Load task failed; draw the error message
    Failed(String),
}

/// Handle to the background load task, owned by the interactive app only
pub struct ChartHandle {
    state: ChartState,
    rx: mpsc::Receiver<Result<ChartData, String>>,
    spinner_frame: usize,
}

impl ChartHandle {
    /// Spawn the load task and return a handle in the pending state
    pub fn spawn(portfolio_path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let result = load_chart_data(portfolio_path).await;
            // Receiver may be gone if the app quit mid-load
            let _ = tx.send(result).await;
        });

        Self {
            state: ChartState::Pending,
            rx,
            spinner_frame: 0,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Current spinner glyph for the placeholder
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Drain the channel and advance the spinner; called from the app tick
    pub fn tick(&mut self) {
        if self.state == ChartState::Pending {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();

            match self.rx.try_recv() {
                Ok(Ok(data)) => {
                    tracing::debug!("Chart data ready ({} points)", data.points.len());
                    self.state = ChartState::Ready(data);
                }
                Ok(Err(e)) => {
                    tracing::warn!("Chart load failed: {}", e);
                    self.state = ChartState::Failed(e);
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.state = ChartState::Failed("chart loader stopped".to_string());
                }
            }
        }
    }
}

/// Build the chart series from the portfolio file
async fn load_chart_data(portfolio_path: PathBuf) -> Result<ChartData, String> {
    let file = tokio::task::spawn_blocking(move || store::load_or_seed(&portfolio_path))
        .await
        .map_err(|e| format!("chart load task failed: {e}"))?
        .map_err(|e| e.to_string())?;

    let data = if file.history.is_empty() {
        let values = demo::synthetic_history(&file.positions);
        ChartData::from_values(&values, None)
    } else {
        ChartData::from_history(&file.history)
    };

    if data.is_empty() {
        return Err("portfolio has no value history to chart".to_string());
    }

    Ok(data)
}
