// ============================================================================
// Result Store Interface
// Defines the contract for persisting the computed digits
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to persist a result.
#[derive(Debug)]
pub struct StoreError {
    name: String,
    source: io::Error,
}

impl StoreError {
    pub fn new(name: impl Into<String>, source: io::Error) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Name the content was being stored under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying I/O error kind
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to store '{}': {}", self.name, self.source)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Persistence collaborator for the rendered digits.
pub trait ResultStore: Send + Sync {
    /// Store `content` under `name`, replacing any previous content.
    fn store(&self, name: &str, content: &str) -> Result<(), StoreError>;
}

// ============================================================================
// File Store
// ============================================================================

/// Writes each result to a file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Store in the current working directory
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path a result named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }
}

impl ResultStore for FileStore {
    fn store(&self, name: &str, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        fs::write(&path, content).map_err(|err| StoreError::new(name, err))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "result written");
        Ok(())
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Keeps results in memory (testing and embedding)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content stored under `name`, if any
    pub fn get(&self, name: &str) -> Option<String> {
        self.entries.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ResultStore for MemoryStore {
    fn store(&self, name: &str, content: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }
}
