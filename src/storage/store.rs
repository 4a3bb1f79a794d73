use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde_json::Value;

use super::error::StorageError;
use super::migrate::{Decoded, decode};
use super::slot::{FileSlot, MemorySlot, Slot};
use crate::model::{DailyLog, validate_date, validate_log};

/// File name of the slot inside the data directory.
const SLOT_FILE: &str = "logs.json";

/// What a read of the slot produced.
///
/// A missing, unreadable, or malformed slot is `Empty`: an unavailable
/// history must never stop new entries from being logged.
enum SlotContents {
    Records(Vec<Value>),
    Empty,
}

impl SlotContents {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Records(records) => records,
            Self::Empty => Vec::new(),
        }
    }
}

/// Returns the `date` of a stored element, or `""` if it has none.
fn stored_date(record: &Value) -> &str {
    record.get("date").and_then(Value::as_str).unwrap_or("")
}

fn sort_descending(records: &mut [Value]) {
    records.sort_by(|a, b| stored_date(b).cmp(stored_date(a)));
}

/// Replaces the element with `date`, or appends one, keeping the order.
fn upsert(records: &mut Vec<Value>, date: &str, value: Value) {
    match records.iter().position(|record| stored_date(record) == date) {
        Some(idx) => records[idx] = value,
        None => records.push(value),
    }
    sort_descending(records);
}

/// Durable collection of daily logs, keyed by date.
///
/// The whole collection lives in one [`Slot`] as a JSON array. Every
/// mutating operation reads the array, changes it, and writes it back while
/// holding the store's lock, so concurrent callers in one process cannot lose
/// each other's updates.
///
/// Stored elements are kept as raw JSON. Reads decode them (migrating legacy
/// elements on the way), while writes leave elements they do not touch
/// exactly as they were.
pub struct LogStore {
    slot: Mutex<Box<dyn Slot>>,
}

impl LogStore {
    /// Creates a store over an arbitrary slot.
    pub fn new(slot: impl Slot + 'static) -> Self {
        Self {
            slot: Mutex::new(Box::new(slot)),
        }
    }

    /// Creates a store whose slot is `logs.json` inside `dir`.
    ///
    /// The directory is created if it does not already exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(path = %dir.display(), "opening log store");
        Ok(Self::new(FileSlot::new(dir.join(SLOT_FILE))))
    }

    /// Creates a store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }

    /// Returns every log, most recent date first.
    ///
    /// Legacy elements are migrated; elements that match neither record
    /// shape are skipped.
    pub fn list_all(&self) -> Vec<DailyLog> {
        let records = {
            let slot = self.slot.lock();
            load(&**slot).into_records()
        };

        let mut logs: Vec<DailyLog> = records
            .iter()
            .filter_map(|record| match decode(record) {
                Decoded::Unreadable(e) => {
                    tracing::warn!(
                        error = %e,
                        date = stored_date(record),
                        "skipping unreadable log entry"
                    );
                    None
                }
                decoded => decoded.into_log(),
            })
            .collect();

        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    /// Returns the log for `date`, if one has been saved.
    pub fn get_by_date(&self, date: &str) -> Option<DailyLog> {
        self.list_all().into_iter().find(|log| log.date == date)
    }

    /// Returns logs with `start <= date <= end`, most recent first.
    pub fn get_in_range(&self, start: &str, end: &str) -> Vec<DailyLog> {
        self.list_all()
            .into_iter()
            .filter(|log| log.date.as_str() >= start && log.date.as_str() <= end)
            .collect()
    }

    /// Saves `log`, replacing any stored log with the same date.
    ///
    /// The date is the key: an existing entry for that date is replaced
    /// whole, including its `id`. Returns [`StorageError::Validation`] if the
    /// date is not `YYYY-MM-DD` or a rating or sleep value is not finite.
    pub fn save(&self, log: &DailyLog) -> Result<(), StorageError> {
        validate_log(log)?;
        let value = serde_json::to_value(log)?;

        let mut slot = self.slot.lock();
        let mut records = load(&**slot).into_records();
        upsert(&mut records, &log.date, value);
        store(&mut **slot, &records)?;

        tracing::debug!(date = %log.date, total = records.len(), "saved log");
        Ok(())
    }

    /// Loads the log for `date` (or an empty one), applies `edit`, and saves
    /// the result, all under one lock.
    ///
    /// Returns the saved log. Nothing is written if the edited log fails
    /// validation.
    pub fn update(
        &self,
        date: &str,
        edit: impl FnOnce(&mut DailyLog),
    ) -> Result<DailyLog, StorageError> {
        validate_date(date)?;

        let mut slot = self.slot.lock();
        let mut records = load(&**slot).into_records();
        let mut log = records
            .iter()
            .find(|record| stored_date(record) == date)
            .and_then(|record| decode(record).into_log())
            .unwrap_or_else(|| DailyLog::empty(date));
        edit(&mut log);
        validate_log(&log)?;

        upsert(&mut records, &log.date, serde_json::to_value(&log)?);
        store(&mut **slot, &records)?;

        tracing::debug!(date = %log.date, total = records.len(), "updated log");
        Ok(log)
    }

    /// Deletes the log for `date`. Returns whether there was one; deleting a
    /// date with no log writes nothing.
    pub fn delete_by_date(&self, date: &str) -> Result<bool, StorageError> {
        let mut slot = self.slot.lock();
        let mut records = load(&**slot).into_records();
        let before = records.len();
        records.retain(|record| stored_date(record) != date);
        if records.len() == before {
            return Ok(false);
        }
        store(&mut **slot, &records)?;

        tracing::debug!(date, total = records.len(), "deleted log");
        Ok(true)
    }

    /// Deletes every log. Returns how many stored elements were removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let mut slot = self.slot.lock();
        let removed = load(&**slot).into_records().len();
        store(&mut **slot, &[])?;

        tracing::info!(removed, "cleared log store");
        Ok(removed)
    }

    /// Serializes the stored collection as pretty-printed JSON.
    ///
    /// Elements are written as stored, legacy ones included, so an export
    /// fed back to [`import_all`](Self::import_all) loses nothing.
    pub fn export_all(&self) -> Result<String, StorageError> {
        let mut records = {
            let slot = self.slot.lock();
            load(&**slot).into_records()
        };
        sort_descending(&mut records);
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Replaces the whole collection with the logs in `snapshot`.
    ///
    /// The snapshot must be a JSON array; its elements are stored verbatim
    /// and migrated when next read. On error the store is left unchanged.
    /// Returns the number of imported elements.
    pub fn import_all(&self, snapshot: &str) -> Result<usize, StorageError> {
        let records = match serde_json::from_str::<Value>(snapshot) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                tracing::warn!("rejected import: top level is not an array");
                return Err(StorageError::NotAnArray);
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected import: invalid JSON");
                return Err(StorageError::InvalidSnapshot(e));
            }
        };

        let mut slot = self.slot.lock();
        store(&mut **slot, &records)?;

        tracing::info!(total = records.len(), "imported logs");
        Ok(records.len())
    }
}

/// Reads and parses the slot, treating any failure as an empty history.
fn load(slot: &dyn Slot) -> SlotContents {
    let raw = match slot.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return SlotContents::Empty,
        Err(e) => {
            tracing::warn!(error = %e, "could not read log store, treating as empty");
            return SlotContents::Empty;
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => SlotContents::Records(records),
        Ok(_) => {
            tracing::warn!("log store does not hold an array, treating as empty");
            SlotContents::Empty
        }
        Err(e) => {
            tracing::warn!(error = %e, "log store is corrupt, treating as empty");
            SlotContents::Empty
        }
    }
}

/// Writes the whole collection to the slot in one operation.
fn store(slot: &mut dyn Slot, records: &[Value]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(records)?;
    slot.write(&raw)?;
    Ok(())
}
