use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, NoteUpdate};
use crate::store::{Collection, StorageBackend};

pub fn create<B: StorageBackend>(
    notes: &mut Collection<Note, B>,
    title: String,
    content: String,
) -> Result<CmdResult<Note>> {
    let note = notes.add(|id| Note::new(id, title, content))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Note created ({}): {}",
        note.id, note.title
    )));
    Ok(result.with_affected(vec![note]))
}

pub fn edit<B: StorageBackend>(
    notes: &mut Collection<Note, B>,
    id: u32,
    update: NoteUpdate,
) -> Result<CmdResult<Note>> {
    let mut result = CmdResult::default();
    match notes.update(id, |note| note.apply(update))? {
        Some(note) => {
            result.add_message(CmdMessage::success(format!(
                "Note updated ({}): {}",
                note.id, note.title
            )));
            result.affected.push(note);
        }
        None => result.add_message(CmdMessage::warning(format!("Note {} not found", id))),
    }
    Ok(result)
}
