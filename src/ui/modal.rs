use crate::app::{App, UiMode};
use crate::domain::TaskState;
use crate::format::format_stamp;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation dialog
pub fn render_confirm_modal(f: &mut Frame, app: &App, area: Rect) {
    let message = match app.ui_mode {
        UiMode::ConfirmDeleteTask => app.store.dialog_task().map(|task| {
            format!(
                "  Delete task \"{}\" ({} sessions)?",
                task.name,
                task.sessions.len()
            )
        }),
        UiMode::ConfirmDeleteSession => app
            .store
            .dialog_session()
            .map(|session| format!("  Delete the session started {}?", format_stamp(session.start))),
        _ => None,
    };

    if let Some(message) = message {
        let variant = app.theme_variant();
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw(message));
        lines.push(Line::raw(""));
        lines.push(Line::raw("  This cannot be undone."));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  [y]", modal_title_style(variant)),
            Span::raw(" Delete  "),
            Span::styled("[n]", modal_title_style(variant)),
            Span::raw(" Keep"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Confirm Delete ", modal_title_style(variant)))
                    .style(modal_bg_style(variant)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the task state picker
pub fn render_state_picker(f: &mut Frame, app: &App, area: Rect) {
    if app.ui_mode == UiMode::SettingState {
        let variant = app.theme_variant();
        let current = app.selected_task().map(|t| t.state);
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw("  Set the task's state:"));
        lines.push(Line::raw(""));

        for (idx, state) in TaskState::all().iter().enumerate() {
            let key_span = Span::styled(format!("  [{}] ", idx + 1), modal_title_style(variant));
            let line = if Some(*state) == current {
                Line::from(vec![
                    key_span,
                    Span::styled(state.to_tag().to_string(), modal_title_style(variant)),
                    Span::raw(" ← Current"),
                ])
            } else {
                Line::from(vec![key_span, Span::raw(state.to_tag().to_string())])
            };
            lines.push(line);
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  [Esc]", modal_title_style(variant)),
            Span::raw(" Cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Set State ", modal_title_style(variant)))
                    .style(modal_bg_style(variant)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the move-session target picker
pub fn render_move_picker(f: &mut Frame, app: &App, area: Rect) {
    if app.ui_mode == UiMode::MovingSession {
        let variant = app.theme_variant();
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw("  Move the session to:"));
        lines.push(Line::raw(""));

        for (idx, task) in app.move_picker_targets().iter().enumerate() {
            let line = if idx == app.move_picker_index {
                Line::from(vec![
                    Span::styled("  → ".to_string(), modal_title_style(variant)),
                    Span::styled(task.name.clone(), modal_title_style(variant)),
                ])
            } else {
                Line::from(vec![Span::raw("    ".to_string()), Span::raw(task.name.clone())])
            };
            lines.push(line);
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  [Enter]", modal_title_style(variant)),
            Span::raw(" Move  "),
            Span::styled("[Esc]", modal_title_style(variant)),
            Span::raw(" Cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Move Session ", modal_title_style(variant)))
                    .style(modal_bg_style(variant)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
