//! Theme colors loaded from the user's terminal theme
//! Reads colors from ~/.config/kitty/current-theme.conf when present

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,        // Active borders, highlights
    pub positive: Color,      // Gains, up-trend tint
    pub negative: Color,      // Losses, down-trend tint
    pub warning: Color,       // Degraded states, load failures
    pub text: Color,          // Primary text
    pub text_dim: Color,      // Dimmed text
    pub bg_selected: Color,   // Selection background
    pub inactive: Color,      // Inactive borders
    pub header: Color,        // Table header text
}

impl Default for Theme {
    fn default() -> Self {
        // Fallback to Catppuccin-inspired colors if no terminal theme is found
        Self {
            accent: Color::Rgb(137, 180, 250),
            positive: Color::Rgb(166, 227, 161),
            negative: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(180, 190, 254),
        }
    }
}

impl Theme {
    /// Load theme from the terminal's current theme file
    pub fn load() -> Self {
        if let Some(theme) = Self::load_terminal_theme() {
            return theme;
        }

        // Fallback to defaults
        Self::default()
    }

    /// Load colors from a kitty current-theme.conf file
    fn load_terminal_theme() -> Option<Self> {
        let home = dirs::home_dir()?;

        // Omarchy symlinks the active theme; plain kitty keeps its own copy
        let candidates = [
            home.join(".config/omarchy/current/theme/kitty.conf"),
            home.join(".config/kitty/current-theme.conf"),
        ];

        let content = candidates
            .iter()
            .find_map(|p| fs::read_to_string(p).ok())?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        // Map the standard 16-color slots onto semantic roles:
        // color2 (green) carries gains, color1 (red) carries losses.
        let accent = colors
            .get("color4")
            .or(colors.get("color12"))
            .copied()
            .unwrap_or(Color::Rgb(137, 180, 250));

        let positive = colors
            .get("color2")
            .or(colors.get("color10"))
            .copied()
            .unwrap_or(Color::Rgb(166, 227, 161));

        let negative = colors
            .get("color1")
            .or(colors.get("color9"))
            .copied()
            .unwrap_or(Color::Rgb(243, 139, 168));

        let warning = colors
            .get("color3")
            .or(colors.get("color11"))
            .copied()
            .unwrap_or(Color::Rgb(249, 226, 175));

        let text = colors
            .get("foreground")
            .copied()
            .unwrap_or(Color::Rgb(205, 214, 244));

        let text_dim = colors
            .get("color8")
            .copied()
            .unwrap_or(Color::Rgb(147, 153, 178));

        let bg_selected = colors
            .get("selection_background")
            .or(colors.get("color0"))
            .copied()
            .unwrap_or(Color::Rgb(69, 71, 90));

        let inactive = colors
            .get("inactive_border_color")
            .or(colors.get("color8"))
            .copied()
            .unwrap_or(Color::Rgb(88, 91, 112));

        let header = colors
            .get("color5")
            .or(colors.get("color13"))
            .copied()
            .unwrap_or(Color::Rgb(180, 190, 254));

        Some(Self {
            accent,
            positive,
            negative,
            warning,
            text,
            text_dim,
            bg_selected,
            inactive,
            header,
        })
    }

    /// Color for a signed value: gains render positive, losses negative
    pub fn change_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse "key value" format
            let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
            if parts.len() == 2 {
                let key = parts[0].trim();
                let value = parts[1].trim();

                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kitty_conf_colors() {
        let conf = "\
# a comment
foreground #cdd6f4
color1 #f38ba8
color2 #a6e3a1
not_a_color something
";
        let colors = Theme::parse_kitty_conf(conf);
        assert_eq!(colors.get("foreground"), Some(&Color::Rgb(205, 214, 244)));
        assert_eq!(colors.get("color1"), Some(&Color::Rgb(243, 139, 168)));
        assert_eq!(colors.get("color2"), Some(&Color::Rgb(166, 227, 161)));
        assert!(!colors.contains_key("not_a_color"));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(
            Theme::parse_hex_color("#fff"),
            Some(Color::Rgb(255, 255, 255))
        );
        assert_eq!(Theme::parse_hex_color("bogus"), None);
    }

    #[test]
    fn change_color_follows_sign() {
        let theme = Theme::default();
        assert_eq!(theme.change_color(4.2), theme.positive);
        assert_eq!(theme.change_color(-0.1), theme.negative);
        assert_eq!(theme.change_color(0.0), theme.positive);
    }
}
