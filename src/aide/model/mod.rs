//! Record types for the four collections.
//!
//! Each entity is a plain serde struct; its JSON keys double as CSV headers.
//! Edits go through an `*Update` patch where `None` (or an empty string)
//! means "keep the current value". A patch can replace a field but never
//! clear it.

mod contact;
mod finance;
mod note;
mod task;

pub use contact::{Contact, ContactUpdate};
pub use finance::FinanceRecord;
pub use note::{Note, NoteUpdate};
pub use task::{Priority, Task, TaskUpdate};

/// Overwrite `field` with `value` unless the value is absent or blank.
pub(crate) fn replace_text(field: &mut String, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        *field = v;
    }
}

/// Same as [`replace_text`] for optional fields.
pub(crate) fn replace_optional_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        *field = Some(v);
    }
}
