use super::Storage;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the stint directory - checks for local .stint first, then falls back to global ~/.stint
pub fn get_stint_dir() -> Result<PathBuf> {
    // Check for local .stint directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let local_stint = find_local_stint(&current_dir);

    if let Some(local_dir) = local_stint {
        return Ok(local_dir);
    }

    // Fall back to global ~/.stint
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".stint"))
}

/// Find local .stint directory by walking up the directory tree
fn find_local_stint(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let stint_dir = current.join(".stint");
        if stint_dir.exists() && stint_dir.is_dir() {
            return Some(stint_dir);
        }

        // Move up to parent directory
        current = current.parent()?;
    }
}

/// Ensure the stint directory exists
pub fn ensure_stint_dir() -> Result<PathBuf> {
    let dir = get_stint_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .stint directory in the current directory
pub fn init_local_stint() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let stint_dir = current_dir.join(".stint");

    if stint_dir.exists() {
        anyhow::bail!("Stint directory already exists: {}", stint_dir.display());
    }

    fs::create_dir_all(&stint_dir)
        .with_context(|| format!("Failed to create directory: {}", stint_dir.display()))?;

    Ok(stint_dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    // Write content
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    // Sync to disk
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return None if the file doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Storage backend keeping one JSON file per slot in a stint directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Open storage in the resolved stint directory, creating it if needed
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(ensure_stint_dir()?))
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        read_optional(self.slot_path(slot))
    }

    fn write(&self, slot: &str, payload: &str) -> Result<()> {
        atomic_write(self.slot_path(slot), payload)
    }
}
