use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Collection, DeleteTarget, Record, StorageBackend};
use std::path::Path;

/// Every record, in stored order.
pub fn list<R: Record, B: StorageBackend>(collection: &Collection<R, B>) -> CmdResult<R> {
    CmdResult::default().with_listed(collection.list().to_vec())
}

pub fn view<R: Record, B: StorageBackend>(collection: &Collection<R, B>, id: u32) -> CmdResult<R> {
    match collection.find(id) {
        Some(record) => CmdResult::default().with_listed(vec![record.clone()]),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!("{} {} not found", R::LABEL, id)));
            result
        }
    }
}

pub fn delete<R: Record, B: StorageBackend>(
    collection: &mut Collection<R, B>,
    target: DeleteTarget,
) -> Result<CmdResult<R>> {
    let removed_records: Vec<R> = match target {
        DeleteTarget::All => collection.list().to_vec(),
        DeleteTarget::Id(id) => collection.find(id).cloned().into_iter().collect(),
    };
    collection.delete(target)?;

    let mut result = CmdResult::default();
    match (target, removed_records.len()) {
        (DeleteTarget::All, n) => {
            result.add_message(CmdMessage::success(format!(
                "All {} records deleted ({})",
                R::LABEL.to_lowercase(),
                n
            )));
        }
        (DeleteTarget::Id(id), 0) => {
            result.add_message(CmdMessage::warning(format!("{} {} not found", R::LABEL, id)));
        }
        (DeleteTarget::Id(id), _) => {
            result.add_message(CmdMessage::success(format!(
                "{} {} deleted: {}",
                R::LABEL,
                id,
                removed_records[0].summary()
            )));
        }
    }
    Ok(result.with_affected(removed_records))
}

pub fn export<R: Record, B: StorageBackend>(
    collection: &Collection<R, B>,
    path: &Path,
) -> Result<CmdResult<R>> {
    let count = collection.export_csv(path)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} record(s) to {}",
        count,
        path.display()
    )));
    Ok(result)
}

pub fn import<R: Record, B: StorageBackend>(
    collection: &mut Collection<R, B>,
    path: &Path,
) -> Result<CmdResult<R>> {
    let summary = collection.import_csv(path)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} record(s) from {}",
        summary.imported,
        path.display()
    )));
    if summary.skipped > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} record(s) whose id already exists",
            summary.skipped
        )));
    }
    Ok(result)
}
