use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

/// Unique task identifier (random, string-encoded in snapshots)
pub type TaskId = Uuid;

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Active,
    Finished,
    Dropped,
}

impl Default for TaskState {
    fn default() -> Self {
        Self::Active
    }
}

impl TaskState {
    /// Parse a state from its snapshot tag like "active"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            "dropped" => Some(Self::Dropped),
            _ => None,
        }
    }

    /// Convert the state to its snapshot tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Dropped => "dropped",
        }
    }

    /// Get all states as a list
    pub fn all() -> &'static [TaskState] {
        &[TaskState::Active, TaskState::Finished, TaskState::Dropped]
    }
}

/// Wire-level identity of a session: its start/end pair.
///
/// Snapshots carry no session ids, so two sessions with the same pair are
/// indistinguishable; operations that take a key act on the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKey {
    pub start: Millis,
    pub end: Option<Millis>,
}

/// A single tracked work interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Internal row identity (not persisted, regenerated on load)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    /// When the interval began
    pub start: Millis,
    /// When it ended (None while still running)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Millis>,
}

impl Session {
    /// Create a running session starting at `start`
    pub fn new(start: Millis) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: None,
        }
    }

    /// Create a completed session
    pub fn closed(start: Millis, end: Millis) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: Some(end),
        }
    }

    pub fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Elapsed time, counting a running session up to `now`
    pub fn duration(&self, now: Millis) -> Millis {
        self.end.unwrap_or(now) - self.start
    }

    pub fn key(&self) -> SessionKey {
        SessionKey {
            start: self.start,
            end: self.end,
        }
    }

    /// Check whether the session overlaps a time window.
    /// A running session is treated as extending to infinity; absent bounds
    /// leave that side of the window open.
    pub fn overlaps(&self, from: Option<Millis>, to: Option<Millis>) -> bool {
        let starts_in_time = match to {
            Some(to) => self.start <= to,
            None => true,
        };
        let ends_in_time = match (self.end, from) {
            (_, None) => true,
            (None, Some(_)) => true,
            (Some(end), Some(from)) => end >= from,
        };
        starts_in_time && ends_in_time
    }
}

/// A tracked task with its session history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, stable across save/load
    pub id: TaskId,
    /// Task name
    pub name: String,
    /// Current lifecycle state
    pub state: TaskState,
    /// Work sessions in creation order
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl Task {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            state: TaskState::Active,
            sessions: Vec::new(),
        }
    }

    /// Check if any session is still running
    pub fn is_running(&self) -> bool {
        self.sessions.iter().any(|s| s.is_running())
    }

    /// Index of the first running session, if any
    pub fn running_session_index(&self) -> Option<usize> {
        self.sessions.iter().position(|s| s.is_running())
    }

    /// Index of the first session matching a start/end pair
    pub fn find_session(&self, key: SessionKey) -> Option<usize> {
        self.sessions.iter().position(|s| s.key() == key)
    }

    /// Total tracked time across all sessions, counting running ones up to `now`
    pub fn total_duration(&self, now: Millis) -> Millis {
        self.sessions.iter().map(|s| s.duration(now)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_state_from_tag() {
        assert_eq!(TaskState::from_tag("active"), Some(TaskState::Active));
        assert_eq!(TaskState::from_tag("finished"), Some(TaskState::Finished));
        assert_eq!(TaskState::from_tag("dropped"), Some(TaskState::Dropped));
        // Snapshot tags are lowercase; anything else falls back at decode time
        assert_eq!(TaskState::from_tag("ACTIVE"), None);
        assert_eq!(TaskState::from_tag("paused"), None);
    }

    #[test]
    fn test_task_state_to_tag() {
        assert_eq!(TaskState::Active.to_tag(), "active");
        assert_eq!(TaskState::Finished.to_tag(), "finished");
        assert_eq!(TaskState::Dropped.to_tag(), "dropped");
    }

    #[test]
    fn test_task_new() {
        let task = Task::new("Write report".to_string());
        assert_eq!(task.name, "Write report");
        assert_eq!(task.state, TaskState::Active);
        assert!(task.sessions.is_empty());
        assert!(!task.is_running());
    }

    #[test]
    fn test_session_duration() {
        let closed = Session::closed(1_000, 4_500);
        assert_eq!(closed.duration(99_999), 3_500);

        let running = Session::new(1_000);
        assert!(running.is_running());
        assert_eq!(running.duration(6_000), 5_000);
    }

    #[test]
    fn test_session_overlaps() {
        let session = Session::closed(1_000, 2_000);

        assert!(session.overlaps(Some(500), Some(1_500)));
        assert!(session.overlaps(Some(1_500), Some(3_000)));
        assert!(session.overlaps(Some(2_000), Some(3_000))); // touches at end
        assert!(session.overlaps(Some(500), Some(1_000))); // touches at start
        assert!(!session.overlaps(Some(2_001), Some(3_000)));
        assert!(!session.overlaps(Some(0), Some(999)));

        // Open bounds
        assert!(session.overlaps(None, Some(1_500)));
        assert!(session.overlaps(Some(1_500), None));
        assert!(session.overlaps(None, None));
    }

    #[test]
    fn test_running_session_overlaps_everything_after_start() {
        let running = Session::new(1_000);

        assert!(running.overlaps(Some(500), Some(1_500)));
        assert!(running.overlaps(Some(5_000_000), None)); // no end yet, still open
        assert!(!running.overlaps(Some(0), Some(999))); // starts after the window
    }

    #[test]
    fn test_task_total_duration() {
        let mut task = Task::new("Fix bug".to_string());
        task.sessions.push(Session::closed(0, 1_000));
        task.sessions.push(Session::closed(5_000, 7_000));
        assert_eq!(task.total_duration(10_000), 3_000);

        // A running session accrues against the supplied now
        task.sessions.push(Session::new(8_000));
        assert_eq!(task.total_duration(10_000), 5_000);
        assert_eq!(task.total_duration(11_000), 6_000);
    }

    #[test]
    fn test_running_session_index() {
        let mut task = Task::new("Test".to_string());
        task.sessions.push(Session::closed(0, 100));
        assert_eq!(task.running_session_index(), None);

        task.sessions.push(Session::new(200));
        task.sessions.push(Session::new(300));
        // First running session wins
        assert_eq!(task.running_session_index(), Some(1));
    }

    #[test]
    fn test_find_session_first_match() {
        let mut task = Task::new("Test".to_string());
        task.sessions.push(Session::closed(0, 100));
        task.sessions.push(Session::closed(200, 300));
        task.sessions.push(Session::closed(200, 300)); // duplicate pair

        let key = SessionKey {
            start: 200,
            end: Some(300),
        };
        assert_eq!(task.find_session(key), Some(1));

        let missing = SessionKey {
            start: 999,
            end: None,
        };
        assert_eq!(task.find_session(missing), None);
    }
}
