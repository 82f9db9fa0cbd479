use ratatui::{prelude::*, widgets::Paragraph};

use pc_base::theme::{self, chars};

use crate::modules::get_panel;
use crate::state::{State, View};

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::bg_base()).fg(theme::text_muted());
    let mut spans = vec![Span::styled(" ", base_style)];

    if state.in_flight > 0 {
        let spin = chars::SPINNER[state.spinner_frame % chars::SPINNER.len()];
        spans.push(Span::styled(
            format!(" {} LOADING {} ", spin, state.in_flight),
            Style::default().fg(theme::bg_base()).bg(theme::warning()).bold(),
        ));
    } else {
        spans.push(Span::styled(" READY ", Style::default().fg(theme::bg_base()).bg(theme::text_muted()).bold()));
    }
    spans.push(Span::styled(" ", base_style));

    let view = match state.view {
        View::Library => "PROMPTS",
        View::Invoke => "INVOKE",
    };
    spans.push(Span::styled(format!(" {} ", view), Style::default().fg(theme::bg_base()).bg(theme::accent_dim()).bold()));
    spans.push(Span::styled(" ", base_style));
    spans.push(Span::styled(format!(" {} ", state.base_url), Style::default().fg(theme::text()).bg(theme::bg_elevated())));
    spans.push(Span::styled(" ", base_style));

    if let Some(synced) = state.last_sync {
        spans.push(Span::styled(format!("synced {} ", synced.format("%H:%M:%S")), base_style));
    }

    let hints = get_panel(state.view).hints(state);
    let right: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", key), Style::default().fg(theme::accent())),
                Span::styled(format!("{} ", label), base_style),
            ]
        })
        .collect();
    let right_width: u16 = right.iter().map(|s| s.width() as u16).sum();

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base_style), layout[0]);
    frame.render_widget(Paragraph::new(Line::from(right)).style(base_style).alignment(Alignment::Right), layout[1]);
}
