//! Chart area renderer.
//!
//! Draws whichever [`ChartState`] the loader currently holds: the spinner
//! placeholder while the series is being materialized, the value chart once
//! it resolves, or a warning message when the load failed.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::chart::loader::{ChartState, LOADING_TEXT};
use crate::chart::ChartData;
use crate::theme::Theme;

pub struct ChartView<'a> {
    state: &'a ChartState,
    spinner: &'static str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> ChartView<'a> {
    pub fn new(state: &'a ChartState, spinner: &'static str, theme: &'a Theme) -> Self {
        Self {
            state,
            spinner,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn container(&self) -> Block<'a> {
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

        Block::default()
            .title(Span::styled(" Portfolio Value ", title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let block = self.container();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Vertically centered spinner + text
        let line = Line::from(vec![
            Span::styled(self.spinner, Style::default().fg(self.theme.accent)),
            Span::styled(
                format!(" {}", LOADING_TEXT),
                Style::default().fg(self.theme.text_dim),
            ),
        ]);
        let y = inner.y + inner.height / 2;
        let row = Rect::new(inner.x, y, inner.width, 1);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(row, buf);
    }

    fn render_failed(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let block = self.container();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let line = Line::from(Span::styled(
            format!("Chart unavailable: {}", message),
            Style::default().fg(self.theme.warning),
        ));
        let y = inner.y + inner.height / 2;
        let row = Rect::new(inner.x, y, inner.width, 1);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(row, buf);
    }

    fn render_chart(&self, data: &ChartData, area: Rect, buf: &mut Buffer) {
        let datasets = vec![Dataset::default()
            .name("Value")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.accent))
            .data(&data.points)];

        let x_labels = match &data.date_range {
            Some((first, last)) => vec![
                Span::styled(first.clone(), Style::default().fg(self.theme.text_dim)),
                Span::styled(last.clone(), Style::default().fg(self.theme.text_dim)),
            ],
            None => vec![
                Span::styled("start", Style::default().fg(self.theme.text_dim)),
                Span::styled("today", Style::default().fg(self.theme.text_dim)),
            ],
        };
        let y_labels: Vec<Span> = data
            .y_labels()
            .into_iter()
            .map(|l| Span::styled(l, Style::default().fg(self.theme.text_dim)))
            .collect();

        let chart = Chart::new(datasets)
            .block(self.container())
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(self.theme.inactive))
                    .bounds(data.x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(self.theme.inactive))
                    .bounds(data.y_bounds)
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            ChartState::Pending => self.render_placeholder(area, buf),
            ChartState::Ready(data) => self.render_chart(data, area, buf),
            ChartState::Failed(message) => self.render_failed(message, area, buf),
        }
    }
}
