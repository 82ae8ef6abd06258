use crate::error::{AideError, Result};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `Collection` handles the "what" (records, ids, persistence policy).
pub trait StorageBackend {
    /// Read the whole serialized collection.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored collection with `contents`.
    fn write(&self, contents: &str) -> Result<()>;

    /// Where the collection lives. For `MemBackend`, a virtual path.
    fn location(&self) -> PathBuf;
}

/// One JSON file per collection.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(AideError::Io)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AideError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, contents).map_err(AideError::Io)
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since aide is single-threaded,
/// which keeps `write` on `&self` like the file backend.
#[derive(Default)]
pub struct MemBackend {
    contents: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing stored text (valid or not).
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            simulate_write_error: RefCell::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(AideError::Store("Simulated write error".to_string()));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://collection.json")
    }
}
