use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use pc_base::theme;

/// Center a `width` x `height` box inside `area`, clamped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

/// Modal box with a message and a footer of key hints
pub fn render_dialog(frame: &mut Frame, area: Rect, title: &str, message: &str, footer: &[(&str, &str)], accent: Color) {
    let width = 60u16;
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let wrapped: usize = message.lines().map(|l| l.chars().count().max(1).div_ceil(inner_width)).sum();
    let height = wrapped as u16 + 6;
    let overlay_area = centered(area, width, height);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for line in message.lines() {
        lines.push(Line::from(Span::styled(format!(" {}", line), Style::default().fg(theme::text()))));
    }
    lines.push(Line::from(""));

    let mut hint_spans = vec![Span::raw(" ")];
    for (key, label) in footer {
        hint_spans.push(Span::styled(format!(" {} ", key), Style::default().fg(theme::bg_base()).bg(accent).bold()));
        hint_spans.push(Span::styled(format!(" {}  ", label), Style::default().fg(theme::text_muted())));
    }
    lines.push(Line::from(hint_spans));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(accent).bold()));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(Clear, overlay_area);
    frame.render_widget(paragraph, overlay_area);
}
