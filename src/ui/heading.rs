//! Page heading widget.
//!
//! Renders a single heading line at one of three prominence levels. Every
//! heading carries [`Heading::TRANSITION_TAG`]; the app's title-transition
//! mechanism keys on that tag to morph the heading across view changes.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::Theme;

/// Permitted heading prominence levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingLevel {
    /// Most prominent; tracked lettering on wide areas
    #[default]
    H1,
    H2,
    H3,
}

/// A page heading: child text, an optional style override, and a level
#[derive(Debug, Clone)]
pub struct Heading<'a> {
    text: &'a str,
    level: HeadingLevel,
    style: Style,
    theme: &'a Theme,
}

impl<'a> Heading<'a> {
    /// Tag read by the title-transition mechanism; emitted by every heading
    pub const TRANSITION_TAG: &'static str = "page-title";

    pub fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self {
            text,
            level: HeadingLevel::default(),
            style: Style::default(),
            theme,
        }
    }

    pub fn level(mut self, level: HeadingLevel) -> Self {
        self.level = level;
        self
    }

    /// Merge an additional style over the level's base style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn transition_tag(&self) -> &'static str {
        Self::TRANSITION_TAG
    }

    fn base_style(&self) -> Style {
        let base = Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD);
        match self.level {
            HeadingLevel::H1 => base,
            HeadingLevel::H2 => base,
            HeadingLevel::H3 => base.add_modifier(Modifier::DIM),
        }
    }

    /// H1 gets letter tracking when the area is wide enough for it
    fn display_text(&self, area: Rect) -> String {
        if self.level != HeadingLevel::H1 {
            return self.text.to_string();
        }

        let tracked: String = {
            let mut out = String::with_capacity(self.text.len() * 2);
            let mut chars = self.text.chars().peekable();
            while let Some(c) = chars.next() {
                out.push(c);
                if chars.peek().is_some() {
                    out.push(' ');
                }
            }
            out
        };

        if (tracked.chars().count() as u16) <= area.width {
            tracked
        } else {
            self.text.to_string()
        }
    }
}

impl Widget for Heading<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let style = self.base_style().patch(self.style);
        let text = self.display_text(area);
        let line = Line::from(Span::styled(text, style));
        line.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn render(heading: Heading, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        heading.render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn h1_is_tracked_on_wide_areas() {
        let theme = Theme::default();
        let buf = render(Heading::new("Portfolio", &theme), 40);
        assert_eq!(row_text(&buf), "P o r t f o l i o");
    }

    #[test]
    fn h1_falls_back_to_plain_text_when_narrow() {
        let theme = Theme::default();
        let buf = render(Heading::new("Portfolio", &theme), 12);
        assert_eq!(row_text(&buf), "Portfolio");
    }

    #[test]
    fn default_level_matches_explicit_h1() {
        let theme = Theme::default();
        let defaulted = render(Heading::new("Gainers", &theme), 30);
        let explicit = render(Heading::new("Gainers", &theme).level(HeadingLevel::H1), 30);
        assert_eq!(defaulted, explicit);
    }

    #[test]
    fn every_level_is_bold() {
        let theme = Theme::default();
        for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
            let buf = render(Heading::new("Losers", &theme).level(level), 30);
            let cell = buf.cell((0, 0)).unwrap();
            assert!(
                cell.style().add_modifier.contains(Modifier::BOLD),
                "{:?} should render bold",
                level
            );
        }
    }

    #[test]
    fn caller_style_merges_over_base() {
        let theme = Theme::default();
        let override_style = Style::default().fg(Color::Rgb(1, 2, 3));
        let buf = render(
            Heading::new("Portfolio", &theme)
                .level(HeadingLevel::H2)
                .style(override_style),
            30,
        );
        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.style().fg, Some(Color::Rgb(1, 2, 3)));
        assert!(cell.style().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn transition_tag_is_fixed() {
        let theme = Theme::default();
        let heading = Heading::new("Portfolio", &theme).level(HeadingLevel::H3);
        assert_eq!(heading.transition_tag(), Heading::TRANSITION_TAG);
        assert_eq!(Heading::TRANSITION_TAG, "page-title");
    }

    #[test]
    fn rerender_is_deterministic() {
        let theme = Theme::default();
        let a = render(Heading::new("Portfolio", &theme), 40);
        let b = render(Heading::new("Portfolio", &theme), 40);
        assert_eq!(a, b);
    }
}
