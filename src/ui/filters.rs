//! Quick-filter panel.
//!
//! A titled container with three fixed, full-width, left-aligned actions.
//! The action set, order, icons, and tints never change; the only external
//! influence is the highlight for the row the app currently has active.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::portfolio::Filter;
use crate::theme::Theme;

/// Semantic tint of a filter action's icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tint {
    Neutral,
    Positive,
    Negative,
}

struct FilterAction {
    icon: &'static str,
    label: &'static str,
    tint: Tint,
    filter: Filter,
}

/// The three actions, in their fixed order
const ACTIONS: [FilterAction; 3] = [
    FilterAction {
        icon: "●",
        label: "All Positions",
        tint: Tint::Neutral,
        filter: Filter::All,
    },
    FilterAction {
        icon: "▲",
        label: "Gainers",
        tint: Tint::Positive,
        filter: Filter::Gainers,
    },
    FilterAction {
        icon: "▼",
        label: "Losers",
        tint: Tint::Negative,
        filter: Filter::Losers,
    },
];

pub struct FilterPanel<'a> {
    theme: &'a Theme,
    active: Filter,
    selected: usize,
    focused: bool,
}

impl<'a> FilterPanel<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            active: Filter::default(),
            selected: 0,
            focused: false,
        }
    }

    /// Mark the row for the filter the app currently has active
    pub fn active(mut self, filter: Filter) -> Self {
        self.active = filter;
        self
    }

    /// Cursor row; only highlighted while the panel is focused
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Number of fixed actions; used by the app for row navigation
    pub const fn count() -> usize {
        ACTIONS.len()
    }

    /// Filter behind the row at `index` (wrapping is the caller's concern)
    pub fn filter_at(index: usize) -> Option<Filter> {
        ACTIONS.get(index).map(|a| a.filter)
    }

    fn tint_color(&self, tint: Tint) -> Color {
        match tint {
            Tint::Neutral => self.theme.text,
            Tint::Positive => self.theme.positive,
            Tint::Negative => self.theme.negative,
        }
    }
}

impl Widget for FilterPanel<'_> {
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
            .title(Span::styled(" Quick Filters ", title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, action) in ACTIONS.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }

            let row_style = if self.focused && i == self.selected {
                Style::default().bg(self.theme.bg_selected)
            } else {
                Style::default()
            };

            // The active filter's label stays accented even when unfocused
            let label_style = if action.filter == self.active {
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text)
            };

            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", action.icon),
                    Style::default().fg(self.tint_color(action.tint)),
                ),
                Span::styled(action.label, label_style),
            ]);

            let row_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            Paragraph::new(line).style(row_style).render(row_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_panel(panel: FilterPanel) -> Buffer {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        buf
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

    fn cell_fg_at(buf: &Buffer, needle: &str) -> Color {
        let area = buf.area;
        for y in 0..area.height {
            for x in 0..area.width {
                let cell = buf.cell((x, y)).unwrap();
                if cell.symbol() == needle {
                    return cell.style().fg.unwrap_or(Color::Reset);
                }
            }
        }
        panic!("glyph {:?} not found in buffer", needle);
    }

    #[test]
    fn renders_exactly_three_actions_in_order() {
        let theme = Theme::default();
        let text = buffer_text(&render_panel(FilterPanel::new(&theme)));

        let all = text.find("All Positions").expect("All Positions row");
        let gainers = text.find("Gainers").expect("Gainers row");
        let losers = text.find("Losers").expect("Losers row");
        assert!(all < gainers && gainers < losers);
    }

    #[test]
    fn icons_carry_semantic_tints() {
        let theme = Theme::default();
        let buf = render_panel(FilterPanel::new(&theme));

        assert_eq!(cell_fg_at(&buf, "▲"), theme.positive);
        assert_eq!(cell_fg_at(&buf, "▼"), theme.negative);
        assert_eq!(cell_fg_at(&buf, "●"), theme.text);
    }

    #[test]
    fn action_set_is_input_independent() {
        let theme = Theme::default();
        let plain = buffer_text(&render_panel(FilterPanel::new(&theme)));
        let highlighted = buffer_text(&render_panel(
            FilterPanel::new(&theme).active(Filter::Losers).focused(true),
        ));

        // Highlight and focus change styling only, never the action list
        for label in ["All Positions", "Gainers", "Losers"] {
            assert!(plain.contains(label));
            assert!(highlighted.contains(label));
        }
    }

    #[test]
    fn filter_at_maps_rows_to_filters() {
        assert_eq!(FilterPanel::filter_at(0), Some(Filter::All));
        assert_eq!(FilterPanel::filter_at(1), Some(Filter::Gainers));
        assert_eq!(FilterPanel::filter_at(2), Some(Filter::Losers));
        assert_eq!(FilterPanel::filter_at(3), None);
    }

    #[test]
    fn rerender_is_deterministic() {
        let theme = Theme::default();
        let a = render_panel(FilterPanel::new(&theme).active(Filter::Gainers));
        let b = render_panel(FilterPanel::new(&theme).active(Filter::Gainers));
        assert_eq!(a, b);
    }
}
