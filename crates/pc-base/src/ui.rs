//! Shared rendering helpers: aligned tables and width-aware truncation.
use ratatui::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme;

/// Column alignment for table cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A single table cell with text, style, and alignment
pub struct Cell {
    pub text: String,
    pub style: Style,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self { text: text.into(), style, align: Align::Left }
    }
    pub fn right(text: impl Into<String>, style: Style) -> Self {
        Self { text: text.into(), style, align: Align::Right }
    }
}

fn pad_to_width(text: &str, target: usize, align: Align) -> String {
    let deficit = target.saturating_sub(text.width());
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(deficit)),
        Align::Right => format!("{}{}", " ".repeat(deficit), text),
    }
}

/// Render a table with ` │ ` column separators and a `─┼─` header underline.
///
/// `selected` paints that data row on the elevated background.
pub fn render_table(header: &[Cell], rows: &[Vec<Cell>], selected: Option<usize>, indent: usize) -> Vec<Line<'static>> {
    let num_cols = header.len();
    let mut col_widths: Vec<usize> = header.iter().map(|c| c.text.width()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate().take(num_cols) {
            col_widths[col] = col_widths[col].max(cell.text.width());
        }
    }

    let pad = " ".repeat(indent);
    let sep_style = Style::default().fg(theme::border());
    let mut lines = Vec::with_capacity(rows.len() + 2);

    let mut header_spans = vec![Span::raw(pad.clone())];
    for (col, hdr) in header.iter().enumerate() {
        if col > 0 {
            header_spans.push(Span::styled(" │ ", sep_style));
        }
        header_spans.push(Span::styled(
            pad_to_width(&hdr.text, col_widths[col], hdr.align),
            Style::default().fg(theme::accent()).bold(),
        ));
    }
    lines.push(Line::from(header_spans));

    let mut underline = vec![Span::raw(pad.clone())];
    for (col, width) in col_widths.iter().enumerate() {
        if col > 0 {
            underline.push(Span::styled("─┼─", sep_style));
        }
        underline.push(Span::styled("─".repeat(*width), sep_style));
    }
    lines.push(Line::from(underline));

    for (idx, row) in rows.iter().enumerate() {
        let row_bg = (selected == Some(idx)).then(theme::bg_elevated);
        let with_bg = |style: Style| match row_bg {
            Some(bg) => style.bg(bg),
            None => style,
        };
        let mut spans = vec![Span::raw(pad.clone())];
        for (col, col_w) in col_widths.iter().enumerate() {
            if col > 0 {
                spans.push(Span::styled(" │ ", with_bg(sep_style)));
            }
            match row.get(col) {
                Some(cell) => spans.push(Span::styled(pad_to_width(&cell.text, *col_w, cell.align), with_bg(cell.style))),
                None => spans.push(Span::styled(" ".repeat(*col_w), with_bg(Style::default()))),
            }
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Cut `s` to `max_width` display cells, ending with `…` when shortened
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw + 1 > max_width {
            result.push('…');
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

/// First line of a template, for one-line previews
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
