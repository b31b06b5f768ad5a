use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::model::task::Task;

/// Error type for persisting the task list
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The single persisted slot holding the whole task list.
///
/// `load` never fails: a missing or unreadable slot is an empty list.
/// `save` replaces the slot wholesale.
pub trait TaskStore {
    fn load(&mut self) -> Vec<Task>;
    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn load(&mut self) -> Vec<Task> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }
}

/// Decode a stored task list. A JSON `null` counts as "no tasks".
pub fn decode_tasks(raw: &[u8]) -> Result<Vec<Task>, serde_json::Error> {
    let tasks: Option<Vec<Task>> = serde_json::from_slice(raw)?;
    Ok(tasks.unwrap_or_default())
}

/// Encode the task list in its persisted layout
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Task list stored as a JSON array in one file.
///
/// If the file exists but cannot be decoded, its bytes are kept and copied
/// to `<file>.corrupt` before the first save overwrites them.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    unreadable: Option<Vec<u8>>,
    /// Set when the file exists but could not be read at all. Saves are
    /// refused so the unseen contents are never replaced.
    read_failure: Option<io::ErrorKind>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            unreadable: None,
            read_failure: None,
        }
    }

    /// Where unreadable data is preserved
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    fn preserve_unreadable(&mut self) -> Result<(), StoreError> {
        let Some(raw) = self.unreadable.as_deref() else {
            return Ok(());
        };
        let backup = self.corrupt_path();
        atomic_write(&backup, raw).map_err(|source| StoreError::Io {
            path: backup.clone(),
            source,
        })?;
        warn!(path = %backup.display(), "preserved unreadable task data");
        self.unreadable = None;
        Ok(())
    }
}

impl TaskStore for JsonFileStore {
    fn load(&mut self) -> Vec<Task> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read task file, starting empty and read-only");
                self.read_failure = Some(e.kind());
                return Vec::new();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "task file is not valid, starting empty");
                self.unreadable = Some(raw);
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        if let Some(kind) = self.read_failure {
            return Err(StoreError::Io {
                path: self.path.clone(),
                source: io::Error::new(
                    kind,
                    "the existing file could not be read, refusing to overwrite it",
                ),
            });
        }
        self.preserve_unreadable()?;
        let content = encode_tasks(tasks)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A store that keeps the encoded slot in memory. Goes through the same
/// encoding as the file store, so round-trips are real.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
    /// When set, every save fails
    pub fail_saves: bool,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose slot already holds `raw`
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryStore {
            slot: Some(raw.into()),
            ..Self::default()
        }
    }

    /// A store already holding `tasks`
    pub fn with_tasks(tasks: &[Task]) -> Self {
        let raw = encode_tasks(tasks).unwrap_or_default();
        Self::with_raw(raw)
    }

    /// Make every later save fail
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl TaskStore for MemoryStore {
    fn load(&mut self) -> Vec<Task> {
        match self.slot.as_deref() {
            Some(raw) => decode_tasks(raw.as_bytes()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::other("save rejected"),
            });
        }
        self.slot = Some(encode_tasks(tasks)?);
        self.saves += 1;
        Ok(())
    }
}
