pub mod task;
pub mod views;

pub use task::{Millis, Session, SessionKey, Task, TaskId, TaskState};
pub use views::{filter_task_sessions, filter_tasks, FilterParams, StateFilter};
