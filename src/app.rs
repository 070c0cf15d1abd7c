use crate::domain::{Millis, Session, StateFilter, Task, TaskId, TaskState};
use crate::format::{format_stamp_precise, parse_stamp};
use crate::persistence::{Theme, ThemeMode, ThemeVariant};
use crate::store::TaskStore;
use anyhow::Result;
use chrono::{Local, TimeZone};

const DAY_MS: Millis = 24 * 60 * 60 * 1000;

/// Which screen the key handler and renderer are in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    RenamingTask,
    EditingSession,
    SplittingSession,
    SettingState,
    ConfirmDeleteTask,
    ConfirmDeleteSession,
    MovingSession,
}

/// Which of the two main panes owns the selection keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Tasks,
    Sessions,
}

/// Time window presets cycled from the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPreset {
    AllTime,
    Today,
    LastWeek,
    LastMonth,
}

impl WindowPreset {
    pub fn next(&self) -> Self {
        match self {
            Self::AllTime => Self::Today,
            Self::Today => Self::LastWeek,
            Self::LastWeek => Self::LastMonth,
            Self::LastMonth => Self::AllTime,
        }
    }

    /// Display label for the header bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllTime => "all time",
            Self::Today => "today",
            Self::LastWeek => "last 7 days",
            Self::LastMonth => "last 30 days",
        }
    }

    /// Window bounds relative to `now`, half-open towards the future
    pub fn bounds(&self, now: Millis) -> (Option<Millis>, Option<Millis>) {
        match self {
            Self::AllTime => (None, None),
            Self::Today => (Some(local_midnight(now)), None),
            Self::LastWeek => (Some(now - 7 * DAY_MS), None),
            Self::LastMonth => (Some(now - 30 * DAY_MS), None),
        }
    }
}

/// Input form state for the add/rename/edit/split dialogs
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    /// Task name (add and rename modes)
    pub name: String,
    /// Session start, or the split point (session modes)
    pub start: String,
    /// Session end; blank keeps the session running (edit mode)
    pub end: String,
    pub editing_field: usize, // 0 = start, 1 = end
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub ui_mode: UiMode,
    pub focused_pane: Pane,
    /// Row in the filtered task list
    pub selected_task_index: usize,
    pub input_form: Option<InputFormState>,
    /// Row in the move-session target list
    pub move_picker_index: usize,
    pub window: WindowPreset,
    /// One-shot message shown in place of the key hints
    pub status: Option<String>,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        let mut app = Self {
            store,
            ui_mode: UiMode::Normal,
            focused_pane: Pane::Tasks,
            selected_task_index: 0,
            input_form: None,
            move_picker_index: 0,
            window: WindowPreset::AllTime,
            status: None,
        };
        app.sync_selection();
        app
    }

    // --- Selection ---

    /// Tasks currently visible in the task pane
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.current_tasks()
    }

    /// The task under the cursor, if any
    pub fn selected_task(&self) -> Option<Task> {
        self.visible_tasks().get(self.selected_task_index).cloned()
    }

    /// The selected session row resolved to its task and unfiltered index.
    ///
    /// The session pane shows the windowed view, so the row number cannot be
    /// used against the stored task directly; the session id bridges the two.
    pub fn selected_session(&self) -> Option<(TaskId, usize, Session)> {
        let task_id = self.store.current_task_id?;
        let windowed = self.store.current_task()?;
        let row = self.store.current_session_index?;
        let session = windowed.sessions.get(row)?.clone();
        let task = self.store.task(task_id)?;
        let index = task.sessions.iter().position(|s| s.id == session.id)?;
        Some((task_id, index, session))
    }

    /// Move selection up in the focused pane
    pub fn move_selection_up(&mut self) {
        match self.focused_pane {
            Pane::Tasks => {
                if self.selected_task_index > 0 {
                    self.selected_task_index -= 1;
                    self.store.current_session_index = None;
                    self.sync_selection();
                }
            }
            Pane::Sessions => {
                if let Some(row) = self.store.current_session_index {
                    if row > 0 {
                        self.store.current_session_index = Some(row - 1);
                    }
                }
            }
        }
    }

    /// Move selection down in the focused pane
    pub fn move_selection_down(&mut self) {
        match self.focused_pane {
            Pane::Tasks => {
                if self.selected_task_index + 1 < self.visible_tasks().len() {
                    self.selected_task_index += 1;
                    self.store.current_session_index = None;
                    self.sync_selection();
                }
            }
            Pane::Sessions => {
                let count = self.store.current_task().map_or(0, |t| t.sessions.len());
                if let Some(row) = self.store.current_session_index {
                    if row + 1 < count {
                        self.store.current_session_index = Some(row + 1);
                    }
                }
            }
        }
    }

    /// Toggle focus between the task and session panes
    pub fn focus_next_pane(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Tasks => Pane::Sessions,
            Pane::Sessions => Pane::Tasks,
        };
    }

    /// Clamp the cursors back onto the filtered lists after any change
    fn sync_selection(&mut self) {
        let visible = self.store.current_tasks();
        let previous = self.store.current_task_id;

        if visible.is_empty() {
            self.selected_task_index = 0;
            self.store.current_task_id = None;
        } else {
            if self.selected_task_index >= visible.len() {
                self.selected_task_index = visible.len() - 1;
            }
            self.store.current_task_id = Some(visible[self.selected_task_index].id);
        }

        // Landing on a different task resets the session cursor
        if self.store.current_task_id != previous {
            self.store.current_session_index = None;
        }

        let count = self.store.current_task().map_or(0, |t| t.sessions.len());
        self.store.current_session_index = match (self.store.current_session_index, count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(row), count) => Some(row.min(count - 1)),
        };
    }

    // --- Timer ---

    /// Start the selected task, or stop it if it is already running
    pub fn toggle_selected_task(&mut self) -> Result<()> {
        if let Some(task) = self.selected_task() {
            let now = now_millis();
            if task.is_running() {
                self.store.stop_task(task.id, now)?;
            } else {
                self.store.start_task(task.id, now)?;
            }
            self.sync_selection();
        }
        Ok(())
    }

    // --- Filters ---

    /// The state filter currently applied to the task pane
    pub fn state_filter(&self) -> StateFilter {
        self.store
            .current_state_filter
            .unwrap_or(self.store.filter_params.state)
    }

    /// Cycle the state filter all -> active -> finished -> dropped
    pub fn cycle_state_filter(&mut self) {
        self.store.current_state_filter = Some(self.state_filter().cycle());
        self.sync_selection();
    }

    /// Cycle the time window preset and reapply its bounds
    pub fn cycle_window(&mut self) {
        self.window = self.window.next();
        let (from, to) = self.window.bounds(now_millis());
        self.store.filter_params.from = from;
        self.store.filter_params.to = to;
        self.sync_selection();
    }

    // --- Theme ---

    pub fn theme_variant(&self) -> ThemeVariant {
        self.store.theme().variant
    }

    /// Flip light/dark and pin the choice
    pub fn toggle_theme(&mut self) -> Result<()> {
        let variant = self.store.theme().variant.toggled();
        self.store.set_theme(Theme {
            mode: ThemeMode::Manual,
            variant,
        })
    }

    // --- Input form ---

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Start renaming the selected task (opens input form, pre-filled)
    pub fn start_rename_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.input_form = Some(InputFormState {
                name: task.name,
                ..Default::default()
            });
            self.ui_mode = UiMode::RenamingTask;
        }
    }

    /// Start editing the selected session's bounds (opens input form)
    pub fn start_edit_session(&mut self) {
        if let Some((_, _, session)) = self.selected_session() {
            self.input_form = Some(InputFormState {
                start: format_stamp_precise(session.start),
                end: session.end.map(format_stamp_precise).unwrap_or_default(),
                ..Default::default()
            });
            self.ui_mode = UiMode::EditingSession;
        }
    }

    /// Start splitting the selected session at a typed point
    pub fn start_split_session(&mut self) {
        if self.selected_session().is_some() {
            self.input_form = Some(InputFormState::default());
            self.ui_mode = UiMode::SplittingSession;
        }
    }

    /// Toggle between the start and end fields of the session form
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    /// Add character to the input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        let mode = self.ui_mode;
        if let Some(form) = &mut self.input_form {
            match mode {
                UiMode::AddingTask | UiMode::RenamingTask => form.name.push(c),
                UiMode::EditingSession => {
                    if form.editing_field == 0 {
                        form.start.push(c);
                    } else {
                        form.end.push(c);
                    }
                }
                UiMode::SplittingSession => form.start.push(c),
                _ => {}
            }
        }
    }

    /// Backspace in the input form (current field)
    pub fn input_form_backspace(&mut self) {
        let mode = self.ui_mode;
        if let Some(form) = &mut self.input_form {
            match mode {
                UiMode::AddingTask | UiMode::RenamingTask => {
                    form.name.pop();
                }
                UiMode::EditingSession => {
                    if form.editing_field == 0 {
                        form.start.pop();
                    } else {
                        form.end.pop();
                    }
                }
                UiMode::SplittingSession => {
                    form.start.pop();
                }
                _ => {}
            }
        }
    }

    /// Submit the input form in whatever mode it was opened for.
    ///
    /// Invalid timestamps leave the form open with a status message; only
    /// storage failures escape as errors.
    pub fn submit_input_form(&mut self) -> Result<()> {
        match self.ui_mode {
            UiMode::AddingTask => self.submit_add_task(),
            UiMode::RenamingTask => self.submit_rename_task(),
            UiMode::EditingSession => self.submit_edit_session(),
            UiMode::SplittingSession => self.submit_split_session(),
            _ => Ok(()),
        }
    }

    /// Cancel the input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    fn submit_add_task(&mut self) -> Result<()> {
        if let Some(form) = self.input_form.take() {
            let name = form.name.trim().to_string();
            if !name.is_empty() {
                let id = self.store.create_task(&name)?;
                // Jump the cursor to the new task when the filter shows it
                if let Some(row) = self.visible_tasks().iter().position(|t| t.id == id) {
                    self.selected_task_index = row;
                }
            }
        }
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    fn submit_rename_task(&mut self) -> Result<()> {
        if let Some(form) = self.input_form.take() {
            let name = form.name.trim().to_string();
            if !name.is_empty() {
                if let Some(id) = self.store.current_task_id {
                    self.store.rename_task(id, &name)?;
                }
            }
        }
        self.ui_mode = UiMode::Normal;
        Ok(())
    }

    fn submit_edit_session(&mut self) -> Result<()> {
        let (start_text, end_text) = match &self.input_form {
            Some(form) => (form.start.clone(), form.end.clone()),
            None => return Ok(()),
        };

        let start = match parse_stamp(&start_text) {
            Some(ms) => ms,
            None => {
                self.status = Some("start must look like 2024-03-01 09:15".to_string());
                return Ok(());
            }
        };
        let end = if end_text.trim().is_empty() {
            None
        } else {
            match parse_stamp(&end_text) {
                Some(ms) => Some(ms),
                None => {
                    self.status =
                        Some("end must look like 2024-03-01 10:40, or be blank".to_string());
                    return Ok(());
                }
            }
        };
        if let Some(end_ms) = end {
            if end_ms < start {
                self.status = Some("end is before start".to_string());
                return Ok(());
            }
        }

        if let Some((task_id, index, _)) = self.selected_session() {
            self.store.edit_session(task_id, index, start, end)?;
        }
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    fn submit_split_session(&mut self) -> Result<()> {
        let at_text = match &self.input_form {
            Some(form) => form.start.clone(),
            None => return Ok(()),
        };

        let at = match parse_stamp(&at_text) {
            Some(ms) => ms,
            None => {
                self.status = Some("split point must look like 2024-03-01 09:45".to_string());
                return Ok(());
            }
        };

        if let Some((task_id, index, session)) = self.selected_session() {
            let inside = at > session.start && session.end.map_or(true, |end| at < end);
            if !inside {
                self.status = Some("split point must fall inside the session".to_string());
                return Ok(());
            }
            let parts = match session.end {
                Some(end) => vec![
                    Session::closed(session.start, at),
                    Session::closed(at, end),
                ],
                // Splitting a running session leaves the tail running
                None => vec![Session::closed(session.start, at), Session::new(at)],
            };
            self.store.split_session(task_id, index, parts)?;
        }
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    // --- State picker ---

    /// Open the state picker for the selected task
    pub fn start_set_state(&mut self) {
        if self.selected_task().is_some() {
            self.ui_mode = UiMode::SettingState;
        }
    }

    /// Set the selected task's lifecycle state and close the picker
    pub fn set_selected_task_state(&mut self, state: TaskState) -> Result<()> {
        if let Some(id) = self.store.current_task_id {
            self.store.update_task_state(id, state)?;
        }
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    // --- Delete dialogs ---

    /// Ask for confirmation before deleting the selected task
    pub fn start_delete_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.store.dialog_task_id = Some(task.id);
            self.ui_mode = UiMode::ConfirmDeleteTask;
        }
    }

    /// Ask for confirmation before deleting the selected session
    pub fn start_delete_session(&mut self) {
        if let Some((task_id, index, _)) = self.selected_session() {
            self.store.dialog_task_id = Some(task_id);
            self.store.dialog_session_index = Some(index);
            self.ui_mode = UiMode::ConfirmDeleteSession;
        }
    }

    /// Carry out the pending delete
    pub fn confirm_dialog(&mut self) -> Result<()> {
        match self.ui_mode {
            UiMode::ConfirmDeleteTask => {
                if let Some(id) = self.store.dialog_task_id.take() {
                    self.store.delete_task(id)?;
                }
            }
            UiMode::ConfirmDeleteSession => {
                let key = self.store.dialog_session().map(|s| s.key());
                if let (Some(id), Some(key)) = (self.store.dialog_task_id, key) {
                    self.store.delete_session(id, key)?;
                }
                self.store.dialog_task_id = None;
                self.store.dialog_session_index = None;
            }
            _ => {}
        }
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    /// Dismiss the pending delete
    pub fn cancel_dialog(&mut self) {
        self.store.dialog_task_id = None;
        self.store.dialog_session_index = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Move session ---

    /// Tasks the selected session could move to
    pub fn move_picker_targets(&self) -> Vec<Task> {
        let source = self.store.current_task_id;
        self.store
            .tasks()
            .iter()
            .filter(|t| Some(t.id) != source)
            .cloned()
            .collect()
    }

    /// Open the move picker for the selected session
    pub fn start_move_session(&mut self) {
        if self.selected_session().is_none() {
            return;
        }
        if self.move_picker_targets().is_empty() {
            self.status = Some("no other task to move the session to".to_string());
            return;
        }
        self.move_picker_index = 0;
        self.ui_mode = UiMode::MovingSession;
    }

    pub fn move_picker_up(&mut self) {
        if self.move_picker_index > 0 {
            self.move_picker_index -= 1;
        }
    }

    pub fn move_picker_down(&mut self) {
        if self.move_picker_index + 1 < self.move_picker_targets().len() {
            self.move_picker_index += 1;
        }
    }

    /// Move the selected session to the picked task
    pub fn submit_move_session(&mut self) -> Result<()> {
        let target = self
            .move_picker_targets()
            .get(self.move_picker_index)
            .map(|t| t.id);
        if let (Some((from, _, session)), Some(to)) = (self.selected_session(), target) {
            self.store.move_session(from, to, session.key())?;
        }
        self.ui_mode = UiMode::Normal;
        self.sync_selection();
        Ok(())
    }

    /// Dismiss the move picker
    pub fn cancel_move_session(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    // --- Status line ---

    /// Drop the one-shot status message (called on every keypress)
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Current wall clock as epoch milliseconds
pub fn now_millis() -> Millis {
    Local::now().timestamp_millis()
}

/// Local midnight of the day containing `now`
fn local_midnight(now: Millis) -> Millis {
    Local
        .timestamp_millis_opt(now)
        .single()
        .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(now - DAY_MS)
}
