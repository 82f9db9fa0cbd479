use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use pc_base::theme::{self, chars};

use super::{InvokeState, TemplatePreview};
use crate::infra::highlight::highlight_json;
use crate::ui::field::render_field;

pub fn render_invoke(frame: &mut Frame, invoke: &InvokeState, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(theme::accent()).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if invoke.path.is_empty() {
        let line = Line::from(Span::styled(
            " No prompt selected. Press Esc and pick one from the list.",
            Style::default().fg(theme::text_muted()),
        ));
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3), Constraint::Length(1)])
        .split(columns[0]);

    render_template(frame, &invoke.template, left[0]);
    render_field(frame, left[1], "Input", &invoke.input, true);
    render_submit(frame, invoke, left[2]);
    render_response(frame, invoke, columns[1]);
}

fn render_template(frame: &mut Frame, template: &TemplatePreview, area: Rect) {
    let muted = Style::default().fg(theme::text_muted());
    let mut lines: Vec<Line<'static>> = Vec::new();
    match template {
        TemplatePreview::NotLoaded => {}
        TemplatePreview::Loading => lines.push(Line::from(Span::styled(" Loading template...", muted))),
        TemplatePreview::Unavailable(reason) => {
            lines.push(Line::from(Span::styled(format!(" Template unavailable: {}", reason), muted)));
        }
        TemplatePreview::Loaded(prompt) => {
            if let Some(system) = prompt.system_message() {
                push_section(&mut lines, "System message", system);
            }
            push_section(&mut lines, "User message", &prompt.user_message);
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn push_section(lines: &mut Vec<Line<'static>>, label: &str, text: &str) {
    lines.push(Line::from(Span::styled(format!(" {}", label), Style::default().fg(theme::accent_dim()).bold())));
    for l in text.lines() {
        lines.push(Line::from(Span::styled(format!("   {}", l), Style::default().fg(theme::text_secondary()))));
    }
}

fn render_submit(frame: &mut Frame, invoke: &InvokeState, area: Rect) {
    let (label, style) = if invoke.loading {
        (" Submitting... ".to_string(), Style::default().fg(theme::bg_base()).bg(theme::warning()).bold())
    } else if invoke.can_submit() {
        (" Submit (^S) ".to_string(), Style::default().fg(theme::bg_base()).bg(theme::accent()).bold())
    } else {
        (" Submit (^S) ".to_string(), Style::default().fg(theme::text_muted()).bg(theme::bg_elevated()))
    };
    frame.render_widget(Paragraph::new(Line::from(vec![Span::raw(" "), Span::styled(label, style)])), area);
}

fn render_response(frame: &mut Frame, invoke: &InvokeState, area: Rect) {
    let error_height = if invoke.error.is_some() { 2 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(error_height), Constraint::Min(1)])
        .split(area);

    if let Some(error) = &invoke.error {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", chars::CROSS), Style::default().fg(theme::error()).bold()),
            Span::styled(error.clone(), Style::default().fg(theme::error())),
        ]);
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), layout[0]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .title(Span::styled(" Response ", Style::default().fg(theme::text_secondary()).bold()));

    let base = Style::default().fg(theme::text());
    let lines: Vec<Line> = match (&invoke.formatted, invoke.display_text()) {
        (Some(json), _) => highlight_json(json, base),
        (None, Some(text)) => text.lines().map(|l| Line::from(Span::styled(l.to_string(), base))).collect(),
        (None, None) => Vec::new(),
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false }).scroll((invoke.scroll, 0));
    frame.render_widget(paragraph, layout[1]);
}
