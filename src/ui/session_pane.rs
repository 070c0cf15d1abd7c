use crate::app::{now_millis, App, Pane};
use crate::domain::{Millis, Session};
use crate::format::{format_duration, format_stamp, format_time_of_day};
use crate::persistence::ThemeVariant;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, running_style, selected_style, title_style,
};
use chrono::{Local, TimeZone};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the session pane for the selected task.
///
/// Shows the windowed view, so a time filter narrows this list too.
pub fn render_session_pane(f: &mut Frame, app: &App, area: Rect) {
    let variant = app.theme_variant();
    let border = if app.focused_pane == Pane::Sessions {
        focused_border_style(variant)
    } else {
        border_style(variant)
    };

    let task = match app.store.current_task() {
        Some(task) => task,
        None => {
            let empty = Paragraph::new("No task selected")
                .style(default_style(variant))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(Span::styled(" Sessions ", title_style(variant))),
                );
            f.render_widget(empty, area);
            return;
        }
    };

    let title = format!(" Sessions ({}) ", task.sessions.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style(variant)));

    if task.sessions.is_empty() {
        let empty = Paragraph::new("No sessions yet. Press Enter to start the timer.")
            .style(default_style(variant))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let now = now_millis();
    let items: Vec<ListItem> = task
        .sessions
        .iter()
        .enumerate()
        .map(|(idx, session)| {
            let line = create_session_line(session, now, variant);
            let style = if Some(idx) == app.store.current_session_index {
                selected_style(variant)
            } else {
                default_style(variant)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

/// Create a single session row
/// Format: 2024-03-01 09:15 → 10:40   1:25:00
fn create_session_line(session: &Session, now: Millis, variant: ThemeVariant) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(format!("{} → ", format_stamp(session.start))));

    match session.end {
        Some(end) => {
            // Repeat the date only when the session crosses midnight
            let end_text = if same_local_day(session.start, end) {
                format_time_of_day(end)
            } else {
                format_stamp(end)
            };
            spans.push(Span::raw(end_text));
        }
        None => spans.push(Span::styled("running".to_string(), running_style(variant))),
    }

    spans.push(Span::raw(format!(
        "   {}",
        format_duration(session.duration(now))
    )));

    Line::from(spans)
}

fn same_local_day(a: Millis, b: Millis) -> bool {
    let day_a = Local.timestamp_millis_opt(a).single().map(|dt| dt.date_naive());
    let day_b = Local.timestamp_millis_opt(b).single().map(|dt| dt.date_naive());
    day_a.is_some() && day_a == day_b
}
