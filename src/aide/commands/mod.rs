//! # Command Layer
//!
//! Business logic for each domain, operating on a [`Collection`](crate::store::Collection)
//! and returning a [`CmdResult`]. Commands never print: the CLI decides how
//! records and messages are rendered.
//!
//! - [`records`]: operations every collection shares (view, delete, export, import)
//! - [`notes`], [`tasks`], [`contacts`], [`finance`]: per-domain create/edit plus
//!   filtering, search and reporting
//! - [`config`]: reading and writing `config.json`

use crate::config::AideConfig;

pub mod config;
pub mod contacts;
pub mod finance;
pub mod notes;
pub mod records;
pub mod tasks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command produced: records it changed, records to display, and
/// messages for the user.
#[derive(Debug)]
pub struct CmdResult<R> {
    pub affected: Vec<R>,
    pub listed: Vec<R>,
    pub config: Option<AideConfig>,
    pub messages: Vec<CmdMessage>,
}

impl<R> Default for CmdResult<R> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: Vec::new(),
            config: None,
            messages: Vec::new(),
        }
    }
}

impl<R> CmdResult<R> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<R>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<R>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_config(mut self, config: AideConfig) -> Self {
        self.config = Some(config);
        self
    }
}
