use crate::app::{App, Pane, UiMode};
use crate::domain::TaskState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Status messages live until the next keypress
    app.clear_status();

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask
        | UiMode::RenamingTask
        | UiMode::EditingSession
        | UiMode::SplittingSession => handle_input_form_mode(app, key),
        UiMode::SettingState => handle_state_picker_mode(app, key),
        UiMode::ConfirmDeleteTask | UiMode::ConfirmDeleteSession => handle_confirm_mode(app, key),
        UiMode::MovingSession => handle_move_picker_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation in the focused pane
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Pane focus
        KeyCode::Tab => {
            app.focus_next_pane();
            Ok(false)
        }
        KeyCode::Left => {
            app.focused_pane = Pane::Tasks;
            Ok(false)
        }
        KeyCode::Right => {
            app.focused_pane = Pane::Sessions;
            Ok(false)
        }

        // Start/stop the selected task's timer
        KeyCode::Enter => {
            app.toggle_selected_task()?;
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Rename task
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start_rename_task();
            Ok(false)
        }

        // Delete task or session, depending on the focused pane
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            match app.focused_pane {
                Pane::Tasks => app.start_delete_task(),
                Pane::Sessions => app.start_delete_session(),
            }
            Ok(false)
        }

        // Set task state
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.start_set_state();
            Ok(false)
        }

        // Edit selected session bounds
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_session();
            Ok(false)
        }

        // Split selected session
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.start_split_session();
            Ok(false)
        }

        // Move selected session to another task
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.start_move_session();
            Ok(false)
        }

        // Cycle state filter
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.cycle_state_filter();
            Ok(false)
        }

        // Cycle time window
        KeyCode::Char('w') | KeyCode::Char('W') => {
            app.cycle_window();
            Ok(false)
        }

        // Toggle light/dark theme
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_theme()?;
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        KeyCode::Esc => Ok(false),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (add/rename/edit/split)
fn handle_input_form_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form()?;
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch between start and end fields
        KeyCode::Tab => {
            app.input_form_toggle_field();
            Ok(false)
        }

        // Backspace
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Add character
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the state picker
fn handle_state_picker_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Number keys to pick the state
        KeyCode::Char('1') => {
            app.set_selected_task_state(TaskState::Active)?;
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.set_selected_task_state(TaskState::Finished)?;
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.set_selected_task_state(TaskState::Dropped)?;
            Ok(false)
        }

        // Cancel with Escape
        KeyCode::Esc => {
            app.ui_mode = UiMode::Normal;
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the delete confirmation dialogs
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Yes, delete
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.confirm_dialog()?;
            Ok(false)
        }

        // No, keep it
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_dialog();
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in the move-session target picker
fn handle_move_picker_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => {
            app.move_picker_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_picker_down();
            Ok(false)
        }

        // Move to the highlighted task
        KeyCode::Enter => {
            app.submit_move_session()?;
            Ok(false)
        }

        // Cancel with Escape
        KeyCode::Esc => {
            app.cancel_move_session();
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::FileStorage;
    use crate::store::TaskStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn create_test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        let mut store = TaskStore::open(Box::new(storage)).unwrap();
        store.create_task("First task").unwrap();
        store.create_task("Second task").unwrap();
        (App::new(store), dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, _dir) = create_test_app();
        assert_eq!(app.selected_task_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_task_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_task_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _dir) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_pane_focus() {
        let (mut app, _dir) = create_test_app();
        assert_eq!(app.focused_pane, Pane::Tasks);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focused_pane, Pane::Sessions);

        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.focused_pane, Pane::Tasks);

        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.focused_pane, Pane::Sessions);
    }

    #[test]
    fn test_handle_toggle_timer() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.selected_task().unwrap().is_running());

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(!app.selected_task().unwrap().is_running());
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, _dir) = create_test_app();

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        type_text(&mut app, "New");

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.tasks().len(), 3);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_handle_form_escape_cancels() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Abandoned");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks().len(), 2);
    }

    #[test]
    fn test_handle_rename_task() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::RenamingTask);

        for _ in 0.."First task".len() {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "Renamed");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.selected_task().unwrap().name, "Renamed");
    }

    #[test]
    fn test_handle_delete_task_confirm() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDeleteTask);

        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_delete_task_cancel() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.store.tasks().len(), 2);

        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.store.tasks().len(), 2);
    }

    #[test]
    fn test_handle_delete_in_session_pane() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDeleteSession);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.selected_task().unwrap().sessions.is_empty());
        // The task itself survives
        assert_eq!(app.store.tasks().len(), 2);
    }

    #[test]
    fn test_handle_state_picker() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::SettingState);

        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.selected_task().unwrap().state, TaskState::Finished);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_state_picker_escape() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_task().unwrap().state, TaskState::Active);
    }

    #[test]
    fn test_handle_filter_cycle() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(
            app.state_filter(),
            crate::domain::StateFilter::Only(TaskState::Active)
        );
    }

    #[test]
    fn test_handle_window_cycle() {
        let (mut app, _dir) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('w'))).unwrap();
        assert_eq!(app.window, crate::app::WindowPreset::Today);
        assert!(app.store.filter_params.from.is_some());
    }

    #[test]
    fn test_handle_theme_toggle() {
        let (mut app, _dir) = create_test_app();
        let before = app.theme_variant();

        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.theme_variant(), before.toggled());
    }

    #[test]
    fn test_handle_edit_session_form_tab() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingSession);
        assert_eq!(app.input_form.as_ref().unwrap().editing_field, 0);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.input_form.as_ref().unwrap().editing_field, 1);
    }

    #[test]
    fn test_handle_move_picker() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::MovingSession);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks()[1].sessions.len(), 1);
    }

    #[test]
    fn test_handle_move_picker_escape() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks()[0].sessions.len(), 1);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let (mut app, _dir) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::F(5))).unwrap();
        assert!(!should_quit);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
