use super::replace_text;
use crate::dates::{self, timestamp_format};
use crate::store::{ImportPolicy, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub content: String,
    /// Last modification time.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl Note {
    pub fn new(id: u32, title: String, content: String) -> Self {
        Self {
            id,
            title,
            content,
            timestamp: dates::now_timestamp(),
        }
    }

    /// Apply a partial edit. The timestamp is refreshed even when every
    /// field of the patch is empty.
    pub fn apply(&mut self, update: NoteUpdate) {
        replace_text(&mut self.title, update.title);
        replace_text(&mut self.content, update.content);
        self.timestamp = dates::now_timestamp();
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Record for Note {
    const LABEL: &'static str = "Note";
    const CSV_HEADERS: &'static [&'static str] = &["id", "title", "content", "timestamp"];
    const IMPORT_POLICY: ImportPolicy = ImportPolicy::MintIds;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn summary(&self) -> String {
        self.title.clone()
    }
}
