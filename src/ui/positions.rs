//! Positions table, filtered by the active quick filter.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Row, Table, Widget},
};

use crate::portfolio::Position;
use crate::theme::Theme;

pub struct PositionsTable<'a> {
    positions: &'a [&'a Position],
    title: &'a str,
    selected: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> PositionsTable<'a> {
    pub fn new(positions: &'a [&'a Position], title: &'a str, theme: &'a Theme) -> Self {
        Self {
            positions,
            title,
            selected: 0,
            theme,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for PositionsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            self.theme.accent
        } else {
            self.theme.inactive
        };
        let title_style = if self.focused {
            Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.inactive)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        // Responsive columns: P&L needs room
        let show_pnl = area.width > 60;

        let header_style = Style::default().fg(self.theme.header);
        let header = if show_pnl {
            Row::new(vec!["Symbol", "Shares", "Last", "Day %", "Value", "P&L"]).style(header_style)
        } else {
            Row::new(vec!["Symbol", "Last", "Day %", "Value"]).style(header_style)
        };

        let rows: Vec<Row> = if self.positions.is_empty() {
            vec![Row::new(vec![Span::styled(
                "  No positions match this filter",
                Style::default().fg(self.theme.text_dim),
            )])]
        } else {
            self.positions
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let change = p.day_change_pct();
                    let change_color = self.theme.change_color(change);
                    let pnl = p.unrealized_pnl();

                    let row_style = if i == self.selected && self.focused {
                        Style::default().bg(self.theme.bg_selected).fg(self.theme.text)
                    } else {
                        Style::default()
                    };

                    let symbol = Span::styled(
                        p.symbol.clone(),
                        Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD),
                    );
                    let shares = Span::styled(
                        format!("{:.1}", p.shares),
                        Style::default().fg(self.theme.text_dim),
                    );
                    let last = Span::styled(
                        format!("{:.2}", p.last),
                        Style::default().fg(self.theme.text),
                    );
                    let day = Span::styled(
                        format!("{:+.2}%", change),
                        Style::default().fg(change_color),
                    );
                    let value = Span::styled(
                        format!("{:.2}", p.market_value()),
                        Style::default().fg(self.theme.text),
                    );
                    let pnl_span = Span::styled(
                        format!("{:+.2}", pnl),
                        Style::default().fg(self.theme.change_color(pnl)),
                    );

                    if show_pnl {
                        Row::new(vec![symbol, shares, last, day, value, pnl_span]).style(row_style)
                    } else {
                        Row::new(vec![symbol, last, day, value]).style(row_style)
                    }
                })
                .collect()
        };

        let widths = if show_pnl {
            vec![
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Min(10),
                Constraint::Min(10),
            ]
        } else {
            vec![
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Min(10),
            ]
        };

        let table = Table::new(rows, widths).header(header).block(block);
        Widget::render(table, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(symbol: &str, last: f64, prev_close: f64) -> Position {
        Position {
            symbol: symbol.to_string(),
            shares: 10.0,
            cost_basis: prev_close,
            last,
            prev_close,
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render_table(positions: &[&Position], width: u16) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 10);
        let mut buf = Buffer::empty(area);
        PositionsTable::new(positions, "All Positions", &theme).render(area, &mut buf);
        buf
    }

    #[test]
    fn renders_symbols_and_title() {
        let a = pos("AAPL", 230.0, 226.0);
        let b = pos("MSFT", 420.0, 425.0);
        let refs = [&a, &b];
        let text = buffer_text(&render_table(&refs, 80));

        assert!(text.contains("All Positions"));
        assert!(text.contains("AAPL"));
        assert!(text.contains("MSFT"));
        assert!(text.contains("P&L"));
    }

    #[test]
    fn narrow_area_drops_pnl_column() {
        let a = pos("AAPL", 230.0, 226.0);
        let refs = [&a];
        let text = buffer_text(&render_table(&refs, 44));

        assert!(text.contains("AAPL"));
        assert!(!text.contains("P&L"));
    }

    #[test]
    fn empty_filter_result_shows_hint() {
        let text = buffer_text(&render_table(&[], 80));
        assert!(text.contains("No positions match this filter"));
    }
}
