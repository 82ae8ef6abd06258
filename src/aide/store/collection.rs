use super::backend::StorageBackend;
use super::{csv_io, DeleteTarget, ImportPolicy, ImportSummary, Record};
use crate::error::{AideError, Result};
use log::{debug, info, warn};
use std::path::Path;

/// The full in-memory list of one record kind plus its backing storage.
///
/// The list and the backend are kept in lockstep: every mutating method
/// rewrites the backend before it returns.
pub struct Collection<R: Record, B: StorageBackend> {
    backend: B,
    records: Vec<R>,
    recovered: bool,
}

impl<R: Record, B: StorageBackend> Collection<R, B> {
    /// Open a collection and load whatever the backend holds.
    pub fn open(backend: B) -> Result<Self> {
        let mut collection = Self {
            backend,
            records: Vec::new(),
            recovered: false,
        };
        collection.load()?;
        Ok(collection)
    }

    /// Replace the in-memory list with the backend's contents.
    ///
    /// Missing storage yields an empty list. Unparseable storage also yields
    /// an empty list (the old contents are overwritten by the next save).
    pub fn load(&mut self) -> Result<()> {
        self.recovered = false;
        self.records = match self.backend.read()? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<R>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(
                        "{} store at {} is empty or corrupt ({}); starting with an empty collection",
                        R::LABEL,
                        self.backend.location().display(),
                        e
                    );
                    self.recovered = true;
                    Vec::new()
                }
            },
        };
        debug!(
            "Loaded {} {} record(s) from {}",
            self.records.len(),
            R::LABEL,
            self.backend.location().display()
        );
        Ok(())
    }

    /// Serialize the whole list and overwrite the backend.
    pub fn save(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.records).map_err(AideError::Serialization)?;
        self.backend.write(&content)?;
        debug!(
            "Saved {} {} record(s) to {}",
            self.records.len(),
            R::LABEL,
            self.backend.location().display()
        );
        Ok(())
    }

    /// `max(ids) + 1`, or 1 for an empty collection. Never fills gaps.
    pub fn next_id(&self) -> u32 {
        self.records.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Build a record with the next id, append it and save.
    pub fn add<F>(&mut self, build: F) -> Result<R>
    where
        F: FnOnce(u32) -> R,
    {
        let record = build(self.next_id());
        self.records.push(record.clone());
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        Ok(record)
    }

    pub fn find(&self, id: u32) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Apply `change` to the record with `id` and save. Returns `None`
    /// (without saving) when there is no such record.
    pub fn update<F>(&mut self, id: u32, change: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut R),
    {
        let Some(pos) = self.records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let mut updated = self.records[pos].clone();
        change(&mut updated);
        let previous = std::mem::replace(&mut self.records[pos], updated.clone());
        if let Err(e) = self.save() {
            self.records[pos] = previous;
            return Err(e);
        }
        Ok(Some(updated))
    }

    /// Remove one record, or all of them. Returns how many were removed.
    /// Always saves, even when nothing matched.
    pub fn delete(&mut self, target: DeleteTarget) -> Result<usize> {
        let remaining: Vec<R> = match target {
            DeleteTarget::All => Vec::new(),
            DeleteTarget::Id(id) => self
                .records
                .iter()
                .filter(|r| r.id() != id)
                .cloned()
                .collect(),
        };
        let removed = self.records.len() - remaining.len();
        self.commit(remaining)?;
        if removed == 0 {
            info!("{} {} not found, nothing deleted", R::LABEL, target);
        } else {
            info!("Deleted {} {} record(s) ({})", removed, R::LABEL, target);
        }
        Ok(removed)
    }

    /// Swap in `records` and save them. On a failed save the previous list
    /// is restored, so memory never runs ahead of storage.
    fn commit(&mut self, records: Vec<R>) -> Result<()> {
        let previous = std::mem::replace(&mut self.records, records);
        if let Err(e) = self.save() {
            self.records = previous;
            return Err(e);
        }
        Ok(())
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the last `load` discarded unparseable storage.
    pub fn recovered_from_corruption(&self) -> bool {
        self.recovered
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write every record to `path` as CSV. Returns the number of rows.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        csv_io::write_records(path, &self.records)?;
        info!(
            "Exported {} {} record(s) to {}",
            self.records.len(),
            R::LABEL,
            path.display()
        );
        Ok(self.records.len())
    }

    /// Merge rows from a CSV file according to `R::IMPORT_POLICY`, then save.
    /// Nothing is merged if any row fails to parse, or if a row that keeps
    /// its id carries id 0.
    pub fn import_csv(&mut self, path: &Path) -> Result<ImportSummary> {
        let rows: Vec<R> = csv_io::read_records(path)?;
        if R::IMPORT_POLICY == ImportPolicy::KeepIds {
            if let Some(pos) = rows.iter().position(|r| r.id() == 0) {
                return Err(AideError::InvalidInput(format!(
                    "{}: row {} has id 0, ids start at 1",
                    path.display(),
                    pos + 1
                )));
            }
        }

        let mut merged = self.records.clone();
        let mut summary = ImportSummary::default();

        for mut row in rows {
            match R::IMPORT_POLICY {
                ImportPolicy::MintIds => {
                    let next = merged.iter().map(Record::id).max().unwrap_or(0) + 1;
                    row.set_id(next);
                }
                ImportPolicy::KeepIds => {
                    if merged.iter().any(|r| r.id() == row.id()) {
                        debug!("Skipping {} {}: id already present", R::LABEL, row.id());
                        summary.skipped += 1;
                        continue;
                    }
                }
            }
            merged.push(row);
            summary.imported += 1;
        }

        self.commit(merged)?;
        info!(
            "Imported {} {} record(s) from {} ({} skipped)",
            summary.imported,
            R::LABEL,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, Note};
    use crate::store::backend::{FileBackend, MemBackend};

    fn notes() -> Collection<Note, MemBackend> {
        Collection::open(MemBackend::new()).unwrap()
    }

    fn add_note(c: &mut Collection<Note, MemBackend>, title: &str) -> Note {
        c.add(|id| Note::new(id, title.to_string(), String::new()))
            .unwrap()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut c = notes();
        assert_eq!(add_note(&mut c, "a").id, 1);
        assert_eq!(add_note(&mut c, "b").id, 2);
        assert_eq!(add_note(&mut c, "c").id, 3);
    }

    #[test]
    fn ids_never_repeat_after_deleting_the_newest_of_others() {
        let mut c = notes();
        add_note(&mut c, "a");
        add_note(&mut c, "b");
        add_note(&mut c, "c");
        c.delete(DeleteTarget::Id(1)).unwrap();
        c.delete(DeleteTarget::Id(2)).unwrap();

        let mut seen = vec![1, 2, 3];
        for title in ["d", "e", "f"] {
            let id = add_note(&mut c, title).id;
            assert!(id > *seen.last().unwrap());
            assert!(!seen.contains(&id));
            seen.push(id);
        }
    }

    #[test]
    fn id_is_reused_only_when_highest_was_deleted() {
        let mut c = notes();
        add_note(&mut c, "a");
        add_note(&mut c, "b");
        c.delete(DeleteTarget::Id(2)).unwrap();
        assert_eq!(add_note(&mut c, "c").id, 2);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut c = notes();
        add_note(&mut c, "a");
        let stored = c.backend().contents().unwrap();
        assert!(stored.contains("\"title\": \"a\""));

        c.update(1, |n| n.title = "renamed".into()).unwrap();
        assert!(c.backend().contents().unwrap().contains("renamed"));

        c.delete(DeleteTarget::Id(1)).unwrap();
        assert_eq!(c.backend().contents().unwrap().trim(), "[]");
    }

    #[test]
    fn find_and_update_missing_ids_return_none() {
        let mut c = notes();
        add_note(&mut c, "a");
        assert!(c.find(42).is_none());
        assert!(c.update(42, |n| n.title = "x".into()).unwrap().is_none());
        assert_eq!(c.find(1).unwrap().title, "a");
    }

    #[test]
    fn delete_missing_id_is_a_noop_that_still_saves() {
        let backend = MemBackend::with_contents("[]");
        let mut c: Collection<Note, MemBackend> = Collection::open(backend).unwrap();
        add_note(&mut c, "a");
        assert_eq!(c.delete(DeleteTarget::Id(9)).unwrap(), 0);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn delete_all_clears_and_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let mut c: Collection<Note, FileBackend> =
            Collection::open(FileBackend::new(&path)).unwrap();
        c.add(|id| Note::new(id, "a".into(), "".into())).unwrap();
        c.add(|id| Note::new(id, "b".into(), "".into())).unwrap();

        assert_eq!(c.delete(DeleteTarget::All).unwrap(), 2);
        assert!(c.list().is_empty());

        let reopened: Collection<Note, FileBackend> =
            Collection::open(FileBackend::new(&path)).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let mut c: Collection<Contact, FileBackend> =
            Collection::open(FileBackend::new(&path)).unwrap();
        c.add(|id| Contact::new(id, "Анна".into(), Some("8 912 345 67 89".into()), None))
            .unwrap();
        c.add(|id| Contact::new(id, "Bob".into(), None, Some("bob@example.com".into())))
            .unwrap();

        let reopened: Collection<Contact, FileBackend> =
            Collection::open(FileBackend::new(&path)).unwrap();
        assert_eq!(reopened.list(), c.list());
        assert!(!reopened.recovered_from_corruption());
    }

    #[test]
    fn corrupt_storage_loads_as_empty() {
        let c: Collection<Note, MemBackend> =
            Collection::open(MemBackend::with_contents("{not json")).unwrap();
        assert!(c.is_empty());
        assert!(c.recovered_from_corruption());
    }

    #[test]
    fn empty_file_counts_as_corrupt() {
        let c: Collection<Note, MemBackend> =
            Collection::open(MemBackend::with_contents("")).unwrap();
        assert!(c.is_empty());
        assert!(c.recovered_from_corruption());
    }

    #[test]
    fn corrupt_storage_is_overwritten_on_next_save() {
        let mut c: Collection<Note, MemBackend> =
            Collection::open(MemBackend::with_contents("garbage")).unwrap();
        add_note(&mut c, "fresh");
        let stored = c.backend().contents().unwrap();
        assert!(!stored.contains("garbage"));
        assert!(stored.contains("fresh"));
    }

    #[test]
    fn write_failures_propagate() {
        let mut c = notes();
        c.backend().set_simulate_write_error(true);
        let err = c
            .add(|id| Note::new(id, "a".into(), "".into()))
            .unwrap_err();
        assert!(matches!(err, AideError::Store(_)));
        assert!(c.is_empty());
    }

    #[test]
    fn failed_save_leaves_update_delete_and_import_unapplied() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("notes.csv");
        let mut c = notes();
        add_note(&mut c, "kept");
        c.export_csv(&csv_path).unwrap();
        let stored = c.backend().contents().unwrap();

        c.backend().set_simulate_write_error(true);

        assert!(c.update(1, |n| n.title = "changed".into()).is_err());
        assert_eq!(c.find(1).unwrap().title, "kept");

        assert!(c.delete(DeleteTarget::Id(1)).is_err());
        assert_eq!(c.len(), 1);
        assert!(c.delete(DeleteTarget::All).is_err());
        assert_eq!(c.len(), 1);

        assert!(c.import_csv(&csv_path).is_err());
        assert_eq!(c.len(), 1);

        assert_eq!(c.backend().contents().unwrap(), stored);
    }

    #[test]
    fn kept_id_import_rejects_id_zero() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("contacts.csv");
        std::fs::write(&csv_path, "id,name,phone,email\n2,Ann,,\n0,Bob,,\n").unwrap();

        let mut c: Collection<Contact, MemBackend> = Collection::open(MemBackend::new()).unwrap();
        let err = c.import_csv(&csv_path).unwrap_err();
        assert!(matches!(err, AideError::InvalidInput(_)));
        assert!(c.is_empty());
        assert!(c.backend().contents().is_none());
    }

    #[test]
    fn kept_id_import_skips_duplicates_within_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("contacts.csv");
        std::fs::write(&csv_path, "id,name,phone,email\n3,Ann,,\n3,Ann again,,\n").unwrap();

        let mut c: Collection<Contact, MemBackend> = Collection::open(MemBackend::new()).unwrap();
        let summary = c.import_csv(&csv_path).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(c.find(3).unwrap().name, "Ann");
    }

    #[test]
    fn export_of_empty_collection_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("notes.csv");
        let c = notes();

        assert_eq!(c.export_csv(&out).unwrap(), 0);
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.trim(), "id,title,content,timestamp");
    }

    #[test]
    fn minted_import_duplicates_on_repeat() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("notes.csv");
        let mut source = notes();
        add_note(&mut source, "one");
        add_note(&mut source, "two");
        source.export_csv(&csv_path).unwrap();

        let mut target = notes();
        let first = target.import_csv(&csv_path).unwrap();
        let second = target.import_csv(&csv_path).unwrap();

        assert_eq!(first.imported, 2);
        assert_eq!(second.imported, 2);
        let ids: Vec<u32> = target.list().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn import_with_bad_rows_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("contacts.csv");
        std::fs::write(&csv_path, "id,name,phone,email\nnot-a-number,Ann,,\n").unwrap();

        let mut c: Collection<Contact, MemBackend> = Collection::open(MemBackend::new()).unwrap();
        assert!(c.import_csv(&csv_path).is_err());
        assert!(c.is_empty());
        assert!(c.backend().contents().is_none());
    }
}
