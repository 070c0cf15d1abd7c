use crate::domain::{Session, Task, TaskState};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Name given to snapshot records that lost theirs
pub const UNTITLED_NAME: &str = "Untitled Task";

/// Encode tasks for the tasks slot.
///
/// The output is byte-stable for identical state, which the store relies on
/// to skip redundant writes.
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("Failed to encode task snapshot")
}

/// Decode the tasks slot strictly. Used by import, where malformed input
/// should fail loudly instead of degrading.
pub fn decode_tasks_strict(payload: &str) -> Result<Vec<Task>> {
    serde_json::from_str(payload).context("Failed to parse task snapshot")
}

/// Decode the tasks slot, recovering whatever is usable.
///
/// Snapshots come back from disk after crashes, manual edits and version
/// skew, so decoding is field by field: a record missing its id is skipped,
/// anything else missing or mistyped falls back to a default. Never fails.
pub fn decode_tasks(payload: &str) -> Vec<Task> {
    let root: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(err) => {
            warn!("task snapshot is not valid JSON, starting empty: {}", err);
            return Vec::new();
        }
    };

    let records = match root {
        Value::Array(records) => records,
        _ => {
            warn!("task snapshot is not an array, starting empty");
            return Vec::new();
        }
    };

    let mut tasks = Vec::new();
    for record in &records {
        match decode_task(record) {
            Some(task) => tasks.push(task),
            None => warn!("skipping task record without a usable id"),
        }
    }
    tasks
}

/// Decode one task record; None only when the id is missing or unusable
fn decode_task(record: &Value) -> Option<Task> {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNTITLED_NAME)
        .to_string();

    let state = record
        .get("state")
        .and_then(Value::as_str)
        .and_then(TaskState::from_tag)
        .unwrap_or_default();

    let sessions = match record.get("sessions").and_then(Value::as_array) {
        Some(entries) => entries.iter().filter_map(decode_session).collect(),
        None => Vec::new(),
    };

    Some(Task {
        id,
        name,
        state,
        sessions,
    })
}

/// Decode one session entry; entries without a numeric start are dropped
fn decode_session(entry: &Value) -> Option<Session> {
    let start = match entry.get("start").and_then(Value::as_i64) {
        Some(start) => start,
        None => {
            warn!("dropping session entry without a numeric start");
            return None;
        }
    };
    // A missing or mistyped end means the session never closed
    let end = entry.get("end").and_then(Value::as_i64);

    Some(Session {
        id: Uuid::new_v4(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_task() -> Task {
        let mut task = Task::new("Write docs".to_string());
        task.id = Uuid::parse_str("6f9fd012-74b8-41d1-a83d-0a8953a9d3c4").unwrap();
        task.sessions.push(Session::closed(1_000, 2_000));
        task.sessions.push(Session::new(3_000));
        task
    }

    #[test]
    fn test_encode_shape() {
        let encoded = encode_tasks(&[fixed_task()]).unwrap();
        let expected = r#"[
  {
    "id": "6f9fd012-74b8-41d1-a83d-0a8953a9d3c4",
    "name": "Write docs",
    "state": "active",
    "sessions": [
      {
        "start": 1000,
        "end": 2000
      },
      {
        "start": 3000
      }
    ]
  }
]"#;
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_is_stable() {
        let tasks = vec![fixed_task()];
        assert_eq!(encode_tasks(&tasks).unwrap(), encode_tasks(&tasks).unwrap());
    }

    #[test]
    fn test_decode_round_trip() {
        let original = fixed_task();
        let decoded = decode_tasks(&encode_tasks(&[original.clone()]).unwrap());

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, original.id);
        assert_eq!(decoded[0].name, original.name);
        assert_eq!(decoded[0].state, original.state);
        assert_eq!(decoded[0].sessions.len(), 2);
        assert_eq!(decoded[0].sessions[0].key(), original.sessions[0].key());
        assert_eq!(decoded[0].sessions[1].key(), original.sessions[1].key());
    }

    #[test]
    fn test_decode_garbage_starts_empty() {
        assert!(decode_tasks("not json at all").is_empty());
        assert!(decode_tasks("").is_empty());
        assert!(decode_tasks("{\"id\": \"x\"}").is_empty()); // object, not array
    }

    #[test]
    fn test_decode_skips_records_without_id() {
        let payload = r#"[
            {"name": "no id here", "state": "active", "sessions": []},
            {"id": "not-a-uuid", "name": "bad id", "state": "active"},
            {"id": "6f9fd012-74b8-41d1-a83d-0a8953a9d3c4", "name": "kept", "state": "active"}
        ]"#;
        let decoded = decode_tasks(payload);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "kept");
    }

    #[test]
    fn test_decode_defaults_name_and_state() {
        let payload = r#"[
            {"id": "6f9fd012-74b8-41d1-a83d-0a8953a9d3c4"},
            {"id": "11f460a0-2a6a-4a75-bc1c-264a6943b1e7", "name": "", "state": "paused"}
        ]"#;
        let decoded = decode_tasks(payload);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, UNTITLED_NAME);
        assert_eq!(decoded[0].state, TaskState::Active);
        assert!(decoded[0].sessions.is_empty());
        // Empty name and unknown state tag both fall back
        assert_eq!(decoded[1].name, UNTITLED_NAME);
        assert_eq!(decoded[1].state, TaskState::Active);
    }

    #[test]
    fn test_decode_tolerates_bad_sessions() {
        let payload = r#"[
            {
                "id": "6f9fd012-74b8-41d1-a83d-0a8953a9d3c4",
                "name": "T",
                "state": "finished",
                "sessions": [
                    {"start": 1000, "end": 2000},
                    {"end": 5000},
                    {"start": "tuesday"},
                    {"start": 3000, "end": "later"}
                ]
            },
            {
                "id": "11f460a0-2a6a-4a75-bc1c-264a6943b1e7",
                "name": "U",
                "state": "active",
                "sessions": "oops"
            }
        ]"#;
        let decoded = decode_tasks(payload);
        assert_eq!(decoded.len(), 2);

        // Entries without a numeric start are dropped; a mistyped end
        // leaves the session running
        assert_eq!(decoded[0].sessions.len(), 2);
        assert_eq!(decoded[0].sessions[0].end, Some(2_000));
        assert_eq!(decoded[0].sessions[1].start, 3_000);
        assert_eq!(decoded[0].sessions[1].end, None);

        // A non-array sessions field decodes as no sessions
        assert!(decoded[1].sessions.is_empty());
    }

    #[test]
    fn test_decode_strict_rejects_garbage() {
        assert!(decode_tasks_strict("not json").is_err());
        assert!(decode_tasks_strict(r#"[{"name": "missing id"}]"#).is_err());
        assert!(decode_tasks_strict("[]").unwrap().is_empty());
    }
}
