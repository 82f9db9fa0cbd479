//! Color themes, embedded from `yamls/themes.yaml` at compile time.
use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

use ratatui::style::Color;
use serde::Deserialize;

/// Default theme ID
pub const DEFAULT_THEME: &str = "ember";

/// RGB color as [r, g, b] array
pub type RgbColor = [u8; 3];

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub accent: RgbColor,
    pub accent_dim: RgbColor,
    pub success: RgbColor,
    pub warning: RgbColor,
    pub error: RgbColor,
    pub text: RgbColor,
    pub text_secondary: RgbColor,
    pub text_muted: RgbColor,
    pub bg_base: RgbColor,
    pub bg_surface: RgbColor,
    pub bg_elevated: RgbColor,
    pub bg_input: RgbColor,
    pub border: RgbColor,
    pub border_focus: RgbColor,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize)]
pub struct ThemesConfig {
    pub themes: HashMap<String, Theme>,
}

pub static THEMES: LazyLock<ThemesConfig> = LazyLock::new(|| {
    serde_yaml::from_str(include_str!("../yamls/themes.yaml"))
        .unwrap_or_else(|e| panic!("Failed to parse themes.yaml: {}", e))
});

static ACTIVE: OnceLock<&'static Theme> = OnceLock::new();

/// Get a theme by ID, falling back to the default
pub fn get_theme(theme_id: &str) -> &'static Theme {
    THEMES.themes.get(theme_id).or_else(|| THEMES.themes.get(DEFAULT_THEME)).expect("default theme must exist")
}

/// Pick the theme for this process. Only the first call has an effect.
pub fn set_active_theme(theme_id: &str) {
    let _ = ACTIVE.set(get_theme(theme_id));
}

pub fn active_theme() -> &'static Theme {
    ACTIVE.get_or_init(|| get_theme(DEFAULT_THEME))
}

fn rgb(c: RgbColor) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

pub fn accent() -> Color {
    rgb(active_theme().colors.accent)
}
pub fn accent_dim() -> Color {
    rgb(active_theme().colors.accent_dim)
}
pub fn success() -> Color {
    rgb(active_theme().colors.success)
}
pub fn warning() -> Color {
    rgb(active_theme().colors.warning)
}
pub fn error() -> Color {
    rgb(active_theme().colors.error)
}
pub fn text() -> Color {
    rgb(active_theme().colors.text)
}
pub fn text_secondary() -> Color {
    rgb(active_theme().colors.text_secondary)
}
pub fn text_muted() -> Color {
    rgb(active_theme().colors.text_muted)
}
pub fn bg_base() -> Color {
    rgb(active_theme().colors.bg_base)
}
pub fn bg_surface() -> Color {
    rgb(active_theme().colors.bg_surface)
}
pub fn bg_elevated() -> Color {
    rgb(active_theme().colors.bg_elevated)
}
pub fn bg_input() -> Color {
    rgb(active_theme().colors.bg_input)
}
pub fn border() -> Color {
    rgb(active_theme().colors.border)
}
pub fn border_focus() -> Color {
    rgb(active_theme().colors.border_focus)
}

pub mod chars {
    pub const HORIZONTAL: &str = "─";
    pub const ARROW_RIGHT: &str = "▸";
    pub const CROSS: &str = "✗";
    pub const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_parse() {
        assert!(THEMES.themes.contains_key(DEFAULT_THEME));
        assert!(THEMES.themes.contains_key("sea"));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(get_theme("does-not-exist").name, get_theme(DEFAULT_THEME).name);
    }
}
