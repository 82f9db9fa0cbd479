pub mod field;
pub mod overlay;
mod status;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use pc_base::theme::{self, chars};

use crate::modules::get_panel;
use crate::state::{State, View};

pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, state, layout[0]);
    get_panel(state.view).render(frame, state, layout[1]);
    status::render_status_bar(frame, state, layout[2]);

    if let Some(alert) = &state.alert {
        overlay::render_dialog(frame, area, &alert.title, &alert.message, &[("Enter", "dismiss")], theme::error());
    }
}

fn render_tabs(frame: &mut Frame, state: &State, area: Rect) {
    let mut spans = vec![Span::styled(" Prompt Console ", Style::default().fg(theme::accent()).bold())];
    for view in [View::Library, View::Invoke] {
        let title = get_panel(view).title(state);
        let style = if view == state.view {
            Style::default().fg(theme::text()).bg(theme::bg_elevated()).bold()
        } else {
            Style::default().fg(theme::text_muted())
        };
        spans.push(Span::styled(format!(" {} ", chars::ARROW_RIGHT), Style::default().fg(theme::border())));
        spans.push(Span::styled(format!(" {} ", title), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::bg_base())), area);
}
