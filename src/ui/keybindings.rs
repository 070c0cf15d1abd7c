use crate::app::{App, Pane};
use crate::ui::styles::{error_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar, or a pending status message
pub fn render_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let variant = app.theme_variant();

    if let Some(status) = &app.status {
        let paragraph =
            Paragraph::new(Line::raw(format!(" {}", status))).style(error_style(variant));
        f.render_widget(paragraph, area);
        return;
    }

    let hints = match app.focused_pane {
        Pane::Tasks => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Enter start/stop   "),
            Span::raw("a add   "),
            Span::raw("r rename   "),
            Span::raw("s state   "),
            Span::raw("d delete   "),
            Span::raw("f filter   "),
            Span::raw("w window   "),
            Span::raw("t theme   "),
            Span::raw("Tab sessions   "),
            Span::raw("q quit"),
        ]),
        Pane::Sessions => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("e edit   "),
            Span::raw("p split   "),
            Span::raw("m move   "),
            Span::raw("d delete   "),
            Span::raw("Tab tasks   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style(variant));
    f.render_widget(paragraph, area);
}
