use super::task::{Millis, Task, TaskState};
use std::str::FromStr;
use thiserror::Error;

/// Task state filter: everything, or a single lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    Only(TaskState),
}

/// Error returned when parsing a state filter from the command line
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown task state {0:?} (expected all, active, finished or dropped)")]
pub struct ParseStateFilterError(String);

impl FromStr for StateFilter {
    type Err = ParseStateFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.to_lowercase();
        if tag == "all" {
            return Ok(Self::All);
        }
        TaskState::from_tag(&tag)
            .map(Self::Only)
            .ok_or_else(|| ParseStateFilterError(s.to_string()))
    }
}

impl StateFilter {
    /// Check whether a task state passes the filter
    pub fn matches(&self, state: TaskState) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => state == *only,
        }
    }

    /// Next filter in the cycle all -> active -> finished -> dropped -> all
    pub fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Only(TaskState::Active),
            Self::Only(TaskState::Active) => Self::Only(TaskState::Finished),
            Self::Only(TaskState::Finished) => Self::Only(TaskState::Dropped),
            Self::Only(TaskState::Dropped) => Self::All,
        }
    }

    /// Display label for the header bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(state) => state.to_tag(),
        }
    }
}

/// Parameters for filtering the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterParams {
    /// Lifecycle state to keep
    pub state: StateFilter,
    /// Window lower bound (unbounded if None)
    pub from: Option<Millis>,
    /// Window upper bound (unbounded if None)
    pub to: Option<Millis>,
}

/// Filter tasks by state and time window.
///
/// A task passes the window when ANY of its sessions overlaps it; the kept
/// tasks retain their full session lists. Filtering sessions down to the
/// window is [`filter_task_sessions`]'s job.
pub fn filter_tasks(tasks: &[Task], params: &FilterParams) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| params.state.matches(task.state))
        .filter(|task| {
            if params.from.is_none() && params.to.is_none() {
                return true;
            }
            task.sessions.iter().any(|s| s.overlaps(params.from, params.to))
        })
        .cloned()
        .collect()
}

/// Clone a task keeping only the sessions that overlap the window
pub fn filter_task_sessions(task: &Task, from: Option<Millis>, to: Option<Millis>) -> Task {
    let mut filtered = task.clone();
    filtered.sessions.retain(|s| s.overlaps(from, to));
    filtered
}
