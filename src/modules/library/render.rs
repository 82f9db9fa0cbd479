use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use pc_base::theme::{self, chars};
use pc_base::ui::{Cell, first_line, render_table, truncate_string};

use super::{Editor, EditorField, EditorMode, LibraryState};
use crate::state::State;
use crate::ui::{field::render_field, overlay::render_dialog};

const PREVIEW_WIDTH: usize = 48;

pub fn render_library(frame: &mut Frame, state: &State, title: &str, area: Rect) {
    let library = &state.library;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .style(Style::default().bg(theme::bg_surface()))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(theme::accent()).bold()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner_height = if library.banner.is_some() { 1 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(1)])
        .split(inner);

    if let Some(banner) = &library.banner {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", chars::CROSS), Style::default().fg(theme::error()).bold()),
            Span::styled(banner.clone(), Style::default().fg(theme::error())),
        ]);
        frame.render_widget(Paragraph::new(line), layout[0]);
    }

    match &library.editor {
        Some(editor) => render_editor(frame, editor, layout[1]),
        None => render_list(frame, state, layout[1]),
    }

    if let Some(path) = &library.confirm_delete {
        let message = format!("This will permanently delete the prompt \"{}\". This action cannot be undone.", path);
        render_dialog(frame, area, "Are you absolutely sure?", &message, &[("y", "delete"), ("n", "cancel")], theme::error());
    }
}

fn render_list(frame: &mut Frame, state: &State, area: Rect) {
    let library = &state.library;
    if library.prompts.is_empty() {
        let text = if library.loading { "Loading prompts..." } else { "No prompts yet. Press n to create one." };
        let line = Line::from(Span::styled(format!(" {}", text), Style::default().fg(theme::text_muted())));
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let lines = render_table(&table_header(), &table_rows(library), Some(library.selected), 1);
    // Header and underline take two lines above the rows
    let selected_line = library.selected as u16 + 2;
    let scroll = (selected_line + 1).saturating_sub(layout[0].height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), layout[0]);

    if let Some(prompt) = library.selected_prompt() {
        render_details(frame, prompt, layout[1]);
    }
}

fn table_header() -> [Cell; 4] {
    [
        Cell::new("Path", Style::default()),
        Cell::new("System message", Style::default()),
        Cell::new("User message", Style::default()),
        Cell::right("Lines", Style::default()),
    ]
}

/// One row per prompt; paths being deleted are struck through
fn table_rows(library: &LibraryState) -> Vec<Vec<Cell>> {
    let preview = Style::default().fg(theme::text_secondary());
    library
        .prompts
        .iter()
        .map(|p| {
            let path_style = if library.deleting.contains(&p.path) {
                Style::default().fg(theme::text_muted()).crossed_out()
            } else {
                Style::default().fg(theme::text())
            };
            vec![
                Cell::new(p.path.clone(), path_style),
                Cell::new(truncate_string(first_line(p.system_message().unwrap_or("")), PREVIEW_WIDTH), preview),
                Cell::new(truncate_string(first_line(&p.user_message), PREVIEW_WIDTH), preview),
                Cell::right(p.user_message.lines().count().max(1).to_string(), Style::default().fg(theme::text_muted())),
            ]
        })
        .collect()
}

fn render_details(frame: &mut Frame, prompt: &pc_base::Prompt, area: Rect) {
    let label = |text: &str| Line::from(Span::styled(format!(" {}", text), Style::default().fg(theme::accent_dim()).bold()));
    let body = |text: &str| -> Vec<Line<'static>> {
        text.lines().map(|l| Line::from(Span::styled(format!("   {}", l), Style::default().fg(theme::text())))).collect()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", chars::HORIZONTAL.repeat(area.width.saturating_sub(2) as usize)),
        Style::default().fg(theme::border()),
    ))];
    lines.push(Line::from(vec![
        Span::styled(" POST ", Style::default().fg(theme::bg_base()).bg(theme::success()).bold()),
        Span::styled(format!(" /{}", prompt.path), Style::default().fg(theme::text()).bold()),
    ]));
    if let Some(system) = prompt.system_message() {
        lines.push(label("System message"));
        lines.extend(body(system));
    }
    lines.push(label("User message"));
    lines.extend(body(&prompt.user_message));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_editor(frame: &mut Frame, editor: &Editor, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Length(3), // Path
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(area);

    let heading = match (editor.mode, editor.is_saving()) {
        (EditorMode::Create, false) => "New prompt".to_string(),
        (EditorMode::Create, true) => "Creating...".to_string(),
        (EditorMode::Edit, false) => format!("Editing /{}", editor.path.as_str()),
        (EditorMode::Edit, true) => "Saving...".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", heading), Style::default().fg(theme::accent()).bold()))),
        layout[0],
    );

    render_field(frame, layout[1], "Path", &editor.path, editor.focus == EditorField::Path);
    render_field(frame, layout[2], "System message (optional)", &editor.system_message, editor.focus == EditorField::SystemMessage);
    render_field(frame, layout[3], "User message", &editor.user_message, editor.focus == EditorField::UserMessage);
}

#[cfg(test)]
mod tests {
    use pc_base::Prompt;
    use pc_base::ui::Align;

    use super::*;

    #[test]
    fn line_count_column_is_right_aligned() {
        let mut library = LibraryState::default();
        library.prompts = vec![Prompt::new("greet", None, "Hi"), Prompt::new("summarize", Some("Be brief".into()), "Summarize:\n{{ text }}\n")];
        let rows = table_rows(&library);
        assert_eq!(rows[0][3].text, "1");
        assert_eq!(rows[1][3].text, "2");
        assert_eq!(rows[1][1].text, "Be brief");
        assert!(rows.iter().all(|r| r[3].align == Align::Right));
        assert_eq!(table_header()[3].align, Align::Right);
    }

    #[test]
    fn deleting_path_is_struck_through() {
        let mut library = LibraryState::default();
        library.prompts = vec![Prompt::new("a", None, "Hi"), Prompt::new("b", None, "Hi")];
        library.deleting.push("b".into());
        let rows = table_rows(&library);
        assert!(rows[1][0].style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert!(!rows[0][0].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
