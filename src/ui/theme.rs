use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub style: Vec<String>,
}

impl ColorConfig {
    fn new(foreground: &str, style: &str) -> Self {
        Self {
            foreground: Some(foreground.to_string()),
            style: style.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl Theme {
    fn from_entries(name: &str, entries: &[(&str, &str, &str)]) -> Self {
        let colors = entries
            .iter()
            .map(|(key, fg, style)| (key.to_string(), ColorConfig::new(fg, style)))
            .collect();

        Self {
            name: name.to_string(),
            colors,
        }
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: "default".to_string(),
        };

        manager.load_default_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    fn current(&self) -> Option<&Theme> {
        self.themes
            .get(&self.current_theme)
            .or_else(|| self.themes.get("default"))
    }

    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        let Some(color_config) = self.current().and_then(|theme| theme.colors.get(style_name)) else {
            return text.to_string();
        };

        let mut styled_text = text.to_string();

        if let Some(color) = color_config.foreground.as_deref().and_then(parse_color) {
            styled_text = styled_text.color(color).to_string();
        }

        for style in &color_config.style {
            styled_text = match style.as_str() {
                "bold" => styled_text.bold().to_string(),
                "italic" => styled_text.italic().to_string(),
                "underline" => styled_text.underline().to_string(),
                "dimmed" => styled_text.dimmed().to_string(),
                _ => styled_text,
            };
        }

        styled_text
    }

    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn load_default_themes(&mut self) {
        let default = Theme::from_entries("default", &[
            ("title", "cyan", "bold"),
            ("header", "blue", "bold"),
            ("caption", "white", "bold"),
            ("guessed", "green", ""),
            ("accepted", "green", "bold"),
            ("rejected", "bright_black", ""),
            ("bonus", "magenta", "bold"),
            ("timer", "yellow", ""),
            ("timer_low", "red", "bold"),
            ("score", "yellow", "bold"),
            ("error", "red", "bold"),
            ("success", "green", "bold"),
            ("warning", "yellow", "bold"),
            ("info", "blue", ""),
            ("separator", "bright_black", "dimmed"),
        ]);

        let dark = Theme::from_entries("dark", &[
            ("title", "bright_cyan", "bold"),
            ("header", "bright_blue", "bold"),
            ("caption", "bright_white", "bold"),
            ("guessed", "bright_green", ""),
            ("accepted", "bright_green", "bold"),
            ("rejected", "white", "dimmed"),
            ("bonus", "bright_magenta", "bold"),
            ("timer", "bright_yellow", ""),
            ("timer_low", "bright_red", "bold"),
            ("score", "bright_yellow", "bold"),
            ("error", "bright_red", "bold"),
            ("success", "bright_green", "bold"),
            ("warning", "bright_yellow", "bold"),
            ("info", "bright_blue", ""),
            ("separator", "white", "dimmed"),
        ]);

        let light = Theme::from_entries("light", &[
            ("title", "blue", "bold"),
            ("header", "magenta", "bold"),
            ("caption", "black", "bold"),
            ("guessed", "blue", ""),
            ("accepted", "blue", "bold"),
            ("timer", "black", ""),
            ("timer_low", "red", "bold"),
            ("score", "magenta", "bold"),
            ("error", "red", "bold"),
        ]);

        for theme in [default, dark, light] {
            self.themes.insert(theme.name.clone(), theme);
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_creation() {
        let manager = ThemeManager::new();
        assert_eq!(manager.current_theme_name(), "default");
        assert_eq!(manager.list_themes(), vec!["dark", "default", "light"]);
    }

    #[test]
    fn test_set_theme() {
        let mut manager = ThemeManager::new();

        assert!(manager.set_theme("dark"));
        assert_eq!(manager.current_theme_name(), "dark");

        assert!(!manager.set_theme("nonexistent"));
        assert_eq!(manager.current_theme_name(), "dark"); // Should remain unchanged
    }

    #[test]
    fn test_apply_style() {
        let manager = ThemeManager::new();

        let styled = manager.apply_style("Round 1 of 10", "header");
        assert!(styled.contains("Round 1 of 10"));

        let unstyled = manager.apply_style("Test", "nonexistent");
        assert_eq!(unstyled, "Test");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("RED"), Some(Color::Red));
        assert_eq!(parse_color("bright_green"), Some(Color::BrightGreen));
        assert_eq!(parse_color("invalid"), None);
    }
}
