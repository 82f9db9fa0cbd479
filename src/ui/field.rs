use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use pc_base::form::TextField;
use pc_base::theme;

/// Draw a bordered text field. The focused field gets the focus border and
/// owns the terminal cursor.
pub fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &TextField, focused: bool) {
    let border = if focused { theme::border_focus() } else { theme::border() };
    let mut title = vec![Span::styled(format!(" {} ", label), Style::default().fg(theme::text_secondary()).bold())];
    if field.read_only {
        title.push(Span::styled("(read-only) ", Style::default().fg(theme::text_muted())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::bg_input()))
        .title(Line::from(title));
    let inner = block.inner(area);

    let (line, col) = field.cursor_line_col();
    let scroll = scroll_for(line, inner.height);
    let fg = if field.read_only { theme::text_muted() } else { theme::text() };
    let paragraph = Paragraph::new(field.as_str().to_string())
        .style(Style::default().fg(fg))
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);

    if focused && !field.read_only && inner.width > 0 && inner.height > 0 {
        let x = cursor_x(field, line, col).min(inner.width.saturating_sub(1) as usize) as u16;
        let y = (line as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(inner.x + x, inner.y + y));
    }
}

/// First visible line so that `line` stays inside a viewport of `height` rows
fn scroll_for(line: usize, height: u16) -> u16 {
    (line as u16).saturating_sub(height.saturating_sub(1))
}

/// Display width of the text left of the cursor on its line
fn cursor_x(field: &TextField, line: usize, col: usize) -> usize {
    let text = field.as_str().split('\n').nth(line).unwrap_or("");
    let before: String = text.chars().take(col).collect();
    before.width()
}
