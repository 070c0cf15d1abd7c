use crate::app::{App, UiMode};
use crate::persistence::ThemeVariant;
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

/// Render the input form for the add/rename/edit/split dialogs
pub fn render_input_form(f: &mut Frame, app: &App, area: Rect) {
    if let Some(form) = &app.input_form {
        let variant = app.theme_variant();
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = match app.ui_mode {
            UiMode::AddingTask => " Add Task ",
            UiMode::RenamingTask => " Rename Task ",
            UiMode::EditingSession => " Edit Session ",
            UiMode::SplittingSession => " Split Session ",
            _ => " Input ",
        };

        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        match app.ui_mode {
            UiMode::AddingTask | UiMode::RenamingTask => {
                lines.push(Line::raw("Name:"));
                lines.push(field_line(&form.name, true, variant));
                lines.push(Line::raw(""));
                lines.push(Line::raw("Enter to save  ·  Esc to cancel"));
            }
            UiMode::EditingSession => {
                let start_label = if form.editing_field == 0 {
                    "Start: (editing)"
                } else {
                    "Start:"
                };
                lines.push(Line::raw(start_label));
                lines.push(field_line(&form.start, form.editing_field == 0, variant));
                lines.push(Line::raw(""));

                let end_label = if form.editing_field == 1 {
                    "End: (editing)"
                } else {
                    "End:"
                };
                lines.push(Line::raw(end_label));
                lines.push(field_line(&form.end, form.editing_field == 1, variant));
                lines.push(Line::raw(""));
                lines.push(Line::raw("A blank end keeps the session running"));
                lines.push(Line::raw(
                    "Tab to switch fields  ·  Enter to save  ·  Esc to cancel",
                ));
            }
            UiMode::SplittingSession => {
                lines.push(Line::raw("Split at (e.g. 2024-03-01 09:45):"));
                lines.push(field_line(&form.start, true, variant));
                lines.push(Line::raw(""));
                lines.push(Line::raw("Enter to split  ·  Esc to cancel"));
            }
            _ => {}
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style(variant)))
                    .style(modal_bg_style(variant)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// One editable field, with a block cursor when it has focus
fn field_line(value: &str, editing: bool, variant: ThemeVariant) -> Line<'static> {
    let mut spans = vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style(variant)),
    ];
    if editing {
        spans.push(Span::styled("█".to_string(), modal_title_style(variant)));
    }
    Line::from(spans)
}
