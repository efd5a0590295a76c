use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::Instant;

use crate::chart::loader::ChartHandle;
use crate::config::AppConfig;
use crate::portfolio::{store, Filter, Position, Snapshot};
use crate::ui::filters::FilterPanel;
use crate::ui::heading::Heading;

/// How long a status message stays in the info line
const STATUS_MESSAGE_SECS: u64 = 3;

/// Duration of the title morph after a navigation
const TITLE_TRANSITION_MS: u128 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Filters,
    Positions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// An in-flight title morph, keyed by the heading's transition tag
#[derive(Debug, Clone)]
struct TitleTransition {
    tag: &'static str,
    started: Instant,
}

pub struct App {
    pub section: Section,
    pub popup: Popup,

    // Quick-filter state
    pub filter: Filter,
    pub selected_filter_row: usize,

    // Positions table state
    pub positions: Vec<Position>,
    pub selected_position: usize,

    // Chart: lazily spawned on the first interactive draw
    pub chart: Option<ChartHandle>,

    pub config: AppConfig,
    pub portfolio_path: PathBuf,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Info line content when no status message is active
    pub info_message: Option<String>,

    title_transition: Option<TitleTransition>,

    // Rate limiting for portfolio re-reads
    last_refresh: Instant,
}

impl App {
    pub fn new(config: AppConfig, portfolio_path: PathBuf) -> Result<Self> {
        let file = store::load_or_seed(&portfolio_path)?;

        let mut app = Self {
            section: Section::Filters,
            popup: Popup::None,

            filter: Filter::default(),
            selected_filter_row: 0,

            positions: file.positions,
            selected_position: 0,

            chart: None,

            config,
            portfolio_path,

            status_message: None,
            status_message_time: None,
            info_message: None,

            title_transition: None,

            last_refresh: Instant::now(),
        };

        app.update_info_message();
        Ok(app)
    }

    /// Spawn the chart load task if it hasn't started yet.
    ///
    /// Called right before each draw; the first call is what makes the chart
    /// materialize, so non-interactive paths that never draw never load it.
    pub fn ensure_chart(&mut self) {
        if self.chart.is_none() {
            tracing::debug!("First draw, spawning chart loader");
            self.chart = Some(ChartHandle::spawn(self.portfolio_path.clone()));
        }
    }

    /// Positions passing the active filter, in stored order
    pub fn filtered_positions(&self) -> Vec<&Position> {
        self.filter.apply(&self.positions)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.positions)
    }

    /// Whether the heading carrying `tag` is mid-morph.
    ///
    /// The transition mechanism only ever morphs elements that emit a
    /// matching transition tag; anything else renders normally.
    pub fn title_transitioning(&self, tag: &str) -> bool {
        self.title_transition.as_ref().is_some_and(|t| t.tag == tag)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    fn set_filter(&mut self, filter: Filter) {
        if filter == self.filter {
            return;
        }

        self.filter = filter;
        self.selected_filter_row = match filter {
            Filter::All => 0,
            Filter::Gainers => 1,
            Filter::Losers => 2,
        };
        self.selected_position = 0;

        // Kick off the heading morph for the new page title
        self.title_transition = Some(TitleTransition {
            tag: Heading::TRANSITION_TAG,
            started: Instant::now(),
        });
    }

    /// Re-read the portfolio file and restart the chart load
    fn reload(&mut self) -> Result<()> {
        let file = store::load(&self.portfolio_path)?;
        self.positions = file.positions;
        self.selected_position = 0;
        self.chart = Some(ChartHandle::spawn(self.portfolio_path.clone()));
        self.update_info_message();
        self.set_status("Portfolio reloaded");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Popup swallows all keys
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.popup = Popup::None;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Filters => Section::Positions,
                    Section::Positions => Section::Filters,
                };
            }

            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),

            KeyCode::Enter | KeyCode::Char(' ') if self.section == Section::Filters => {
                if let Some(filter) = FilterPanel::filter_at(self.selected_filter_row) {
                    self.set_filter(filter);
                }
            }

            // Direct filter shortcuts
            KeyCode::Char('a') | KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('g') | KeyCode::Char('2') => self.set_filter(Filter::Gainers),
            KeyCode::Char('l') | KeyCode::Char('3') => self.set_filter(Filter::Losers),

            KeyCode::Char('r') => {
                if let Err(e) = self.reload() {
                    self.set_status(format!("Reload failed: {}", e));
                }
            }

            KeyCode::Char('?') => self.popup = Popup::Help,

            _ => {}
        }

        Ok(())
    }

    fn move_selection(&mut self, delta: i64) {
        match self.section {
            Section::Filters => {
                let len = FilterPanel::count() as i64;
                let next = (self.selected_filter_row as i64 + delta).rem_euclid(len);
                self.selected_filter_row = next as usize;
            }
            Section::Positions => {
                let len = self.filtered_positions().len() as i64;
                if len == 0 {
                    self.selected_position = 0;
                    return;
                }
                let next = (self.selected_position as i64 + delta).rem_euclid(len);
                self.selected_position = next as usize;
            }
        }
    }

    pub fn tick(&mut self) -> Result<()> {
        // Advance the chart loader (spinner + channel drain)
        if let Some(chart) = &mut self.chart {
            chart.tick();
        }

        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        // Finish the title morph
        if let Some(transition) = &self.title_transition {
            if transition.started.elapsed().as_millis() >= TITLE_TRANSITION_MS {
                self.title_transition = None;
            }
        }

        // Periodic portfolio re-read for fresh quotes
        if self.config.refresh_secs > 0
            && self.last_refresh.elapsed().as_secs() >= self.config.refresh_secs
        {
            self.last_refresh = Instant::now();
            match store::load(&self.portfolio_path) {
                Ok(file) => {
                    self.positions = file.positions;
                    let len = self.filtered_positions().len();
                    if self.selected_position >= len {
                        self.selected_position = len.saturating_sub(1);
                    }
                    self.update_info_message();
                }
                Err(e) => tracing::warn!("Periodic portfolio refresh failed: {}", e),
            }
        }

        Ok(())
    }

    fn update_info_message(&mut self) {
        let snapshot = self.snapshot();
        self.info_message = Some(format!(
            "{} positions │ Total ${:.2} │ Day {:+.2}%",
            self.positions.len(),
            snapshot.total_value,
            snapshot.day_change_pct,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app(name: &str) -> App {
        let dir = std::env::temp_dir().join(format!("folio-app-test-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        App::new(AppConfig::default(), dir.join("portfolio.toml")).unwrap()
    }

    #[test]
    fn new_app_does_not_spawn_chart() {
        let app = test_app("no-chart");
        assert!(app.chart.is_none());
    }

    #[test]
    fn filter_shortcuts_switch_filter_and_start_transition() {
        let mut app = test_app("shortcuts");
        assert_eq!(app.filter, Filter::All);
        assert!(!app.title_transitioning(Heading::TRANSITION_TAG));

        app.handle_key(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.filter, Filter::Gainers);
        assert_eq!(app.selected_filter_row, 1);
        assert!(app.title_transitioning(Heading::TRANSITION_TAG));
        // An unrelated tag never morphs
        assert!(!app.title_transitioning("sidebar"));
    }

    #[test]
    fn reselecting_active_filter_does_not_restart_transition() {
        let mut app = test_app("same-filter");
        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.filter, Filter::All);
        assert!(!app.title_transitioning(Heading::TRANSITION_TAG));
    }

    #[test]
    fn filter_row_selection_wraps() {
        let mut app = test_app("wrap");
        app.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_filter_row, 2);
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_filter_row, 0);
    }

    #[test]
    fn enter_applies_highlighted_filter() {
        let mut app = test_app("enter");
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.filter, Filter::Gainers);
    }

    #[test]
    fn help_popup_opens_and_closes() {
        let mut app = test_app("help");
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.popup, Popup::Help);

        // Other keys are swallowed while the popup is open
        app.handle_key(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.filter, Filter::All);

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn filtered_positions_follow_filter() {
        let mut app = test_app("filtered");
        app.positions = vec![
            Position {
                symbol: "UP".into(),
                shares: 1.0,
                cost_basis: 10.0,
                last: 11.0,
                prev_close: 10.0,
            },
            Position {
                symbol: "DN".into(),
                shares: 1.0,
                cost_basis: 10.0,
                last: 9.0,
                prev_close: 10.0,
            },
        ];

        app.handle_key(key(KeyCode::Char('g'))).unwrap();
        let filtered = app.filtered_positions();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].symbol, "UP");
    }

    #[tokio::test]
    async fn ensure_chart_spawns_on_first_draw() {
        let mut app = test_app("ensure-chart");
        app.ensure_chart();
        assert!(app.chart.is_some());
    }
}
