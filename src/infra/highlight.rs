use std::sync::LazyLock;

use ratatui::prelude::*;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";

/// Convert syntect color to ratatui color
fn to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Highlight `content` as JSON, one ratatui line per source line.
/// Falls back to unstyled lines when no JSON grammar or theme is available.
pub fn highlight_json(content: &str, fallback: Style) -> Vec<Line<'static>> {
    let plain = || -> Vec<Line<'static>> {
        content.lines().map(|l| Line::from(Span::styled(l.to_string(), fallback))).collect()
    };

    let Some(syntax) = SYNTAX_SET.find_syntax_by_extension("json") else {
        return plain();
    };
    let Some(theme) = THEME_SET.themes.get(HIGHLIGHT_THEME) else {
        return plain();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(content) {
        let Ok(ranges) = highlighter.highlight_line(line, &SYNTAX_SET) else {
            return plain();
        };
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                Span::styled(text.trim_end_matches('\n').to_string(), fallback.fg(to_ratatui_color(style.foreground)))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}
