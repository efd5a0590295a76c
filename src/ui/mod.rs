pub mod chart;
pub mod filters;
pub mod heading;
pub mod positions;

use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Popup, Section};
use crate::chart::loader::{ChartState, SPINNER_FRAMES};
use crate::theme::Theme;

use chart::ChartView;
use filters::FilterPanel;
use heading::{Heading, HeadingLevel};
use positions::PositionsTable;

// Load theme colors from the terminal theme once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Page heading + snapshot
            Constraint::Length(1), // Info line
            Constraint::Min(10),   // Chart, filters, positions
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_header(f, app, chunks[0]);
    draw_info_line(f, app, chunks[1]);
    draw_main(f, app, chunks[2]);
    draw_footer(f, chunks[3]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(area);

    // The page title morphs briefly after a filter navigation; the app's
    // transition mechanism keys on the tag the heading emits and dims the
    // element mid-morph.
    let mut title = Heading::new(app.filter.label(), theme());
    if app.title_transitioning(title.transition_tag()) {
        title = title.style(Style::default().add_modifier(Modifier::DIM));
    }
    f.render_widget(title, cols[0]);

    let snapshot = app.snapshot();
    let change_color = theme().change_color(snapshot.day_change_pct);
    let summary = Line::from(vec![
        Span::styled(
            format!("${:.2} ", snapshot.total_value),
            Style::default().fg(theme().text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:+.2}%", snapshot.day_change_pct),
            Style::default().fg(change_color),
        ),
    ]);
    f.render_widget(
        Paragraph::new(summary).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > info message > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.clone(), Style::default().fg(theme().warning)))
    } else if let Some(ref info) = app.info_message {
        Line::from(Span::styled(info.clone(), Style::default().fg(theme().text_dim)))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(theme().text_dim)))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_main(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(40)])
        .split(area);

    draw_sidebar(f, app, cols[0]);
    draw_content(f, app, cols[1]);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let panel = FilterPanel::new(theme())
        .active(app.filter)
        .selected(app.selected_filter_row)
        .focused(app.section == Section::Filters);
    f.render_widget(panel, rows[0]);

    draw_movers_box(f, app, rows[1]);
}

fn draw_movers_box(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " Top Movers ",
            Style::default().fg(theme().inactive),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme().inactive));

    let snapshot = app.snapshot();
    let mut lines = Vec::new();

    match snapshot.top_gainer {
        Some((symbol, pct)) => lines.push(Line::from(vec![
            Span::styled(" ▲ ", Style::default().fg(theme().positive)),
            Span::styled(symbol, Style::default().fg(theme().text)),
            Span::styled(
                format!(" {:+.2}%", pct),
                Style::default().fg(theme().positive),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            " ▲ —",
            Style::default().fg(theme().text_dim),
        ))),
    }

    match snapshot.top_loser {
        Some((symbol, pct)) => lines.push(Line::from(vec![
            Span::styled(" ▼ ", Style::default().fg(theme().negative)),
            Span::styled(symbol, Style::default().fg(theme().text)),
            Span::styled(
                format!(" {:+.2}%", pct),
                Style::default().fg(theme().negative),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            " ▼ —",
            Style::default().fg(theme().text_dim),
        ))),
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    // Small terminals get a fixed-height chart, tall ones an even split
    let chart_height = if area.height < 20 {
        Constraint::Length(9)
    } else {
        Constraint::Ratio(1, 2)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([chart_height, Constraint::Min(6)])
        .split(area);

    draw_chart(f, app, rows[0]);
    draw_positions(f, app, rows[1]);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    // Before the loader is spawned the area behaves like a pending load
    let pending = ChartState::Pending;
    let (state, spinner) = match &app.chart {
        Some(handle) => (handle.state(), handle.spinner()),
        None => (&pending, SPINNER_FRAMES[0]),
    };

    let view = ChartView::new(state, spinner, theme());
    f.render_widget(view, area);
}

fn draw_positions(f: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_positions();
    let table = PositionsTable::new(&filtered, app.filter.label(), theme())
        .selected(app.selected_position)
        .focused(app.section == Section::Positions);
    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" Tab", Style::default().fg(theme().accent)),
        Span::styled(" switch │ ", Style::default().fg(theme().text_dim)),
        Span::styled("j/k", Style::default().fg(theme().accent)),
        Span::styled(" navigate │ ", Style::default().fg(theme().text_dim)),
        Span::styled("a/g/l", Style::default().fg(theme().accent)),
        Span::styled(" filter │ ", Style::default().fg(theme().text_dim)),
        Span::styled("r", Style::default().fg(theme().accent)),
        Span::styled(" reload │ ", Style::default().fg(theme().text_dim)),
        Span::styled("?", Style::default().fg(theme().accent)),
        Span::styled(" help │ ", Style::default().fg(theme().text_dim)),
        Span::styled("q", Style::default().fg(theme().accent)),
        Span::styled(" quit", Style::default().fg(theme().text_dim)),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(50, 60, area);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(" Help ", Style::default().fg(theme().accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme().accent));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Keys heading
            Constraint::Length(1),
            Constraint::Length(1), // Filters heading
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1), // Navigation heading
            Constraint::Min(4),
        ])
        .split(inner);

    f.render_widget(Heading::new("Keys", theme()).level(HeadingLevel::H2), rows[0]);
    f.render_widget(
        Heading::new("Filters", theme()).level(HeadingLevel::H3),
        rows[2],
    );

    let filter_lines = vec![
        help_line("a / 1", "show all positions"),
        help_line("g / 2", "show gainers only"),
        help_line("l / 3", "show losers only"),
    ];
    f.render_widget(Paragraph::new(filter_lines), rows[3]);

    f.render_widget(
        Heading::new("Navigation", theme()).level(HeadingLevel::H3),
        rows[5],
    );

    let nav_lines = vec![
        help_line("Tab", "switch between filters and positions"),
        help_line("j / k / ↑ / ↓", "move selection"),
        help_line("r", "reload portfolio and chart"),
        help_line("q / Ctrl-C", "quit"),
    ];
    f.render_widget(Paragraph::new(nav_lines), rows[6]);
}

fn help_line(keys: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", keys), Style::default().fg(theme().accent)),
        Span::styled(description.to_string(), Style::default().fg(theme().text)),
    ])
}

/// Helper to create a centered rect using a percentage of the available area
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
