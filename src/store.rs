use crate::domain::{
    filter_task_sessions, filter_tasks, FilterParams, Millis, Session, SessionKey, StateFilter,
    Task, TaskId, TaskState,
};
use crate::persistence::{
    decode_tasks, decode_theme, encode_tasks, encode_theme, Storage, Theme, TASKS_SLOT, THEME_SLOT,
};
use anyhow::Result;
use tracing::debug;

/// Owner of all task, session and theme state.
///
/// Every mutation writes the affected slot through the storage port before
/// returning, so persisted state never trails memory. Mutations aimed at a
/// missing task or session are silent no-ops. Malformed persisted data
/// degrades to defaults on load; a failing write propagates to the caller.
pub struct TaskStore {
    tasks: Vec<Task>,
    theme: Theme,

    /// Task the session pane and window getters work against
    pub current_task_id: Option<TaskId>,
    /// State filter override for the current view, if any
    pub current_state_filter: Option<StateFilter>,
    /// Session selected in the current task, if any
    pub current_session_index: Option<usize>,
    /// Time window and base state filter
    pub filter_params: FilterParams,
    /// Task a dialog is open for, if any
    pub dialog_task_id: Option<TaskId>,
    /// Session a dialog is open for, if any
    pub dialog_session_index: Option<usize>,

    storage: Box<dyn Storage>,
    last_tasks_payload: Option<String>,
    last_theme_payload: Option<String>,
}

impl TaskStore {
    /// Open the store, rehydrating tasks and theme from storage
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        let tasks = match storage.read(TASKS_SLOT)? {
            Some(payload) => decode_tasks(&payload),
            None => Vec::new(),
        };
        let theme = match storage.read(THEME_SLOT)? {
            Some(payload) => decode_theme(&payload),
            None => Theme::default(),
        };

        // Seed the suppression baseline from the loaded state so a mutation
        // that changes nothing does not rewrite the slot
        let last_tasks_payload = Some(encode_tasks(&tasks)?);
        let last_theme_payload = Some(encode_theme(&theme)?);

        Ok(Self {
            tasks,
            theme,
            current_task_id: None,
            current_state_filter: None,
            current_session_index: None,
            filter_params: FilterParams::default(),
            dialog_task_id: None,
            dialog_session_index: None,
            storage,
            last_tasks_payload,
            last_theme_payload,
        })
    }

    // --- Task repository ---

    /// Create a task with a fresh id, active and with no sessions yet
    pub fn create_task(&mut self, name: &str) -> Result<TaskId> {
        let task = Task::new(name.to_string());
        let id = task.id;
        self.tasks.push(task);
        self.flush_tasks()?;
        Ok(id)
    }

    /// Delete a task and its whole session history
    pub fn delete_task(&mut self, id: TaskId) -> Result<()> {
        self.tasks.retain(|t| t.id != id);
        self.flush_tasks()
    }

    pub fn rename_task(&mut self, id: TaskId, name: &str) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            task.name = name.to_string();
        }
        self.flush_tasks()
    }

    /// Change a task's lifecycle state. Sessions are untouched; finishing a
    /// task does not stop a clock that is still running on it.
    pub fn update_task_state(&mut self, id: TaskId, state: TaskState) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            task.state = state;
        }
        self.flush_tasks()
    }

    /// Replace the whole repository (the import path)
    pub fn load_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        self.tasks = tasks;
        self.flush_tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    // --- Session ledger ---

    /// Mark a task active and open a new session at `now`.
    ///
    /// There is no guard against a session already running; callers that
    /// should not stack sessions check `is_running` first, as the UI does.
    pub fn start_task(&mut self, id: TaskId, now: Millis) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            task.state = TaskState::Active;
            task.sessions.push(Session::new(now));
        }
        self.flush_tasks()
    }

    /// Close the first running session at `now`; nothing running is a no-op
    pub fn stop_task(&mut self, id: TaskId, now: Millis) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            if let Some(index) = task.running_session_index() {
                task.sessions[index].end = Some(now);
            }
        }
        self.flush_tasks()
    }

    /// Rewrite the bounds of the session at `index`; out of bounds is a no-op
    pub fn edit_session(
        &mut self,
        id: TaskId,
        index: usize,
        start: Millis,
        end: Option<Millis>,
    ) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            if let Some(session) = task.sessions.get_mut(index) {
                session.start = start;
                session.end = end;
            }
        }
        self.flush_tasks()
    }

    /// Remove the first session matching `key`; no match is a no-op
    pub fn delete_session(&mut self, id: TaskId, key: SessionKey) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            if let Some(index) = task.find_session(key) {
                task.sessions.remove(index);
            }
        }
        self.flush_tasks()
    }

    /// Replace the session at `index` with `parts`, keeping their order
    pub fn split_session(&mut self, id: TaskId, index: usize, parts: Vec<Session>) -> Result<()> {
        if let Some(task) = self.task_mut(id) {
            if index < task.sessions.len() {
                task.sessions.splice(index..=index, parts);
            }
        }
        self.flush_tasks()
    }

    /// Move the first session matching `key` from one task to the end of
    /// another. Moving a running session drags the destination back to
    /// active so the running clock is never hidden behind a finished task.
    pub fn move_session(&mut self, from: TaskId, to: TaskId, key: SessionKey) -> Result<()> {
        let from_index = self.tasks.iter().position(|t| t.id == from);
        let to_index = self.tasks.iter().position(|t| t.id == to);

        if let (Some(from_index), Some(to_index)) = (from_index, to_index) {
            let moved = {
                let from_task = &mut self.tasks[from_index];
                from_task
                    .find_session(key)
                    .map(|i| from_task.sessions.remove(i))
            };
            if let Some(session) = moved {
                let to_task = &mut self.tasks[to_index];
                to_task.sessions.push(session);
                if to_task.is_running() {
                    to_task.state = TaskState::Active;
                }
            }
        }
        self.flush_tasks()
    }

    // --- Theme ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.flush_theme()
    }

    // --- Views ---

    /// Tasks passing the filter params, with the current state override
    /// applied on top
    pub fn current_tasks(&self) -> Vec<Task> {
        let mut params = self.filter_params;
        if let Some(state) = self.current_state_filter {
            params.state = state;
        }
        filter_tasks(&self.tasks, &params)
    }

    /// The current task with its sessions narrowed to the filter window
    pub fn current_task(&self) -> Option<Task> {
        let task = self.task(self.current_task_id?)?;
        Some(filter_task_sessions(
            task,
            self.filter_params.from,
            self.filter_params.to,
        ))
    }

    pub fn dialog_task(&self) -> Option<&Task> {
        self.task(self.dialog_task_id?)
    }

    pub fn dialog_session(&self) -> Option<&Session> {
        self.dialog_task()?.sessions.get(self.dialog_session_index?)
    }

    pub fn is_any_task_running(&self) -> bool {
        self.tasks.iter().any(|t| t.is_running())
    }

    // --- Flushing ---

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn flush_tasks(&mut self) -> Result<()> {
        let payload = encode_tasks(&self.tasks)?;
        if self.last_tasks_payload.as_deref() == Some(payload.as_str()) {
            debug!("tasks unchanged, write skipped");
            return Ok(());
        }
        self.storage.write(TASKS_SLOT, &payload)?;
        self.last_tasks_payload = Some(payload);
        Ok(())
    }

    fn flush_theme(&mut self) -> Result<()> {
        let payload = encode_theme(&self.theme)?;
        if self.last_theme_payload.as_deref() == Some(payload.as_str()) {
            debug!("theme unchanged, write skipped");
            return Ok(());
        }
        self.storage.write(THEME_SLOT, &payload)?;
        self.last_theme_payload = Some(payload);
        Ok(())
    }
}
