mod app;
mod chart;
mod config;
mod portfolio;
mod theme;
mod ui;
mod watch;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use portfolio::{store, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version = "0.1.0")]
#[command(about = "A terminal portfolio dashboard")]
struct Args {
    /// Output a portfolio snapshot as JSON (for status bars)
    #[arg(short, long)]
    status: bool,

    /// Run the headless watcher (logs and big-mover notifications)
    #[arg(short, long)]
    watch: bool,

    /// Portfolio file to load instead of the configured one
    #[arg(short, long)]
    portfolio: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only commands; neither constructs the chart loader
    if args.status {
        return print_status(args.portfolio.as_ref());
    }

    if args.watch {
        return watch::start_watching(args.portfolio).await;
    }

    // Run TUI
    run_tui(args.portfolio).await
}

/// One-shot JSON snapshot for status-bar integrations
fn print_status(cli_portfolio: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::load()?;
    let path = config.portfolio_path(cli_portfolio)?;
    let file = store::load_or_seed(&path)?;
    let snapshot = Snapshot::of(&file.positions);

    let class = if snapshot.day_change_value >= 0.0 {
        "positive"
    } else {
        "negative"
    };

    let output = serde_json::json!({
        "text": format!("${:.2} ({:+.2}%)", snapshot.total_value, snapshot.day_change_pct),
        "class": class,
        "alt": class,
        "total_value": snapshot.total_value,
        "day_change_value": snapshot.day_change_value,
        "day_change_pct": snapshot.day_change_pct,
        "positions": file.positions.len(),
        "top_gainer": snapshot.top_gainer.as_ref().map(|(s, p)| {
            serde_json::json!({ "symbol": s, "day_change_pct": p })
        }),
        "top_loser": snapshot.top_loser.as_ref().map(|(s, p)| {
            serde_json::json!({ "symbol": s, "day_change_pct": p })
        }),
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run_tui(cli_portfolio: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load()?;
    let portfolio_path = config.portfolio_path(cli_portfolio.as_ref())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, portfolio_path)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // The first draw is what makes the chart start loading
        app.ensure_chart();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        let _ = app.tick();
    }
}
