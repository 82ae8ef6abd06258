//! # Storage Layer
//!
//! Every aide collection (notes, tasks, contacts, finance) is stored the same
//! way: the full list lives in memory inside a [`Collection`], and every
//! mutation rewrites the whole backing file.
//!
//! ## Design Rationale
//!
//! Raw I/O is abstracted behind [`StorageBackend`] to:
//! - Enable **testing** with `MemBackend` (no filesystem needed)
//! - Keep the record logic in one generic type instead of four copies
//!
//! ## Implementations
//!
//! - [`backend::FileBackend`]: one pretty-printed JSON array per file
//! - [`backend::MemBackend`]: in-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── notes.json       # [{"id": 1, "title": ..., "content": ..., "timestamp": ...}]
//! ├── tasks.json
//! ├── contacts.json
//! ├── finance.json
//! └── config.json
//! ```
//!
//! Dates are `DD-MM-YYYY` strings and timestamps `DD-MM-YYYY HH:MM:SS`.

use crate::error::{AideError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod backend;
pub mod collection;
pub mod csv_io;

pub use backend::{FileBackend, MemBackend, StorageBackend};
pub use collection::Collection;

/// How rows from a CSV import get their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Ignore the row id and assign the next free one. Re-importing the
    /// same file duplicates every row.
    MintIds,
    /// Keep the row id verbatim; rows whose id is already taken are skipped.
    KeepIds,
}

/// A persisted entity with a collection-unique integer id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human name used in messages and logs ("Note", "Task", ...).
    const LABEL: &'static str;

    /// Column order for CSV export. Matches the JSON field names.
    const CSV_HEADERS: &'static [&'static str];

    const IMPORT_POLICY: ImportPolicy;

    fn id(&self) -> u32;

    fn set_id(&mut self, id: u32);

    /// Short one-line description (title, name, ...).
    fn summary(&self) -> String;
}

/// Target of a delete: a single id, or the reserved `ALL` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    All,
    Id(u32),
}

impl FromStr for DeleteTarget {
    type Err = AideError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "ALL" {
            return Ok(DeleteTarget::All);
        }
        s.parse()
            .map(DeleteTarget::Id)
            .map_err(|_| AideError::InvalidInput(format!("Expected an id or ALL, got '{}'", s)))
    }
}

impl fmt::Display for DeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteTarget::All => write!(f, "ALL"),
            DeleteTarget::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Outcome of a CSV import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
