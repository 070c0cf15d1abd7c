pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod session_pane;
pub mod styles;
pub mod task_pane;

use crate::app::{now_millis, App, UiMode};
use crate::format::format_clock;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_modal, render_move_picker, render_state_picker};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use session_pane::render_session_pane;
use task_pane::render_task_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let layout = create_layout(size);

    render_header(f, app, layout.header_area);
    render_task_pane(f, app, layout.tasks_area);
    render_session_pane(f, app, layout.sessions_area);
    render_keybindings(f, app, layout.hints_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    // Render state picker if active
    if app.ui_mode == UiMode::SettingState {
        render_state_picker(f, app, size);
    }

    // Render confirmation modal if active
    if app.ui_mode == UiMode::ConfirmDeleteTask || app.ui_mode == UiMode::ConfirmDeleteSession {
        render_confirm_modal(f, app, size);
    }

    // Render move picker if active
    if app.ui_mode == UiMode::MovingSession {
        render_move_picker(f, app, size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let variant = app.theme_variant();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(9)])
        .split(area);

    let mut spans = vec![
        Span::styled(" stint ", styles::title_style(variant)),
        Span::styled(
            format!("  state: {}", app.state_filter().label()),
            styles::default_style(variant),
        ),
        Span::styled(
            format!("   window: {}", app.window.label()),
            styles::default_style(variant),
        ),
    ];
    if app.store.is_any_task_running() {
        spans.push(Span::styled(
            "   ● recording",
            styles::running_style(variant),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let clock = Span::styled(format_clock(now_millis()), styles::default_style(variant));
    f.render_widget(Paragraph::new(Line::from(clock)), chunks[1]);
}
