pub mod files;
pub mod snapshot;
pub mod theme;

use anyhow::Result;

/// Slot holding the task snapshot
pub const TASKS_SLOT: &str = "tasks";
/// Slot holding the theme preference
pub const THEME_SLOT: &str = "theme";

/// Storage port the task store reads and writes through.
///
/// Implementations map a slot name to a persistent location. Reads return
/// None when nothing was ever written; writes replace the whole payload.
pub trait Storage {
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&self, slot: &str, payload: &str) -> Result<()>;
}

pub use files::{
    atomic_write, ensure_stint_dir, get_stint_dir, init_local_stint, read_optional, FileStorage,
};
pub use snapshot::{decode_tasks, decode_tasks_strict, encode_tasks, UNTITLED_NAME};
pub use theme::{decode_theme, encode_theme, Theme, ThemeMode, ThemeVariant};
