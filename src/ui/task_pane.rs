use crate::app::{now_millis, App, Pane};
use crate::domain::{Millis, Task};
use crate::format::format_duration;
use crate::persistence::ThemeVariant;
use crate::ui::styles::{
    border_style, default_style, focused_border_style, running_style, selected_style, state_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list pane
pub fn render_task_pane(f: &mut Frame, app: &App, area: Rect) {
    let variant = app.theme_variant();
    let tasks = app.visible_tasks();

    let border = if app.focused_pane == Pane::Tasks {
        focused_border_style(variant)
    } else {
        border_style(variant)
    };
    let title = format!(" Tasks ({}) ", tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style(variant)));

    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks here. Press a to add one.")
            .style(default_style(variant))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let now = now_millis();
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, now, variant);
            let style = if idx == app.selected_task_index {
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

/// Create a single task row
/// Format: ▶ Write proposal  [active]  1:23:45
fn create_task_line(task: &Task, now: Millis, variant: ThemeVariant) -> Line<'static> {
    let mut spans = Vec::new();

    if task.is_running() {
        spans.push(Span::styled("▶ ".to_string(), running_style(variant)));
    } else {
        spans.push(Span::raw("  ".to_string()));
    }

    spans.push(Span::raw(task.name.clone()));
    spans.push(Span::raw("  ".to_string()));
    spans.push(Span::styled(
        format!("[{}]", task.state.to_tag()),
        state_style(variant, task.state),
    ));

    let total = task.total_duration(now);
    if total > 0 || task.is_running() {
        spans.push(Span::raw(format!("  {}", format_duration(total))));
    }

    Line::from(spans)
}
