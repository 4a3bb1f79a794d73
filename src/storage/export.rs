use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::error::StorageError;
use super::store::LogStore;

/// Writes the store's export snapshot to the given path.
pub fn export_to_path(store: &LogStore, path: &Path) -> Result<(), StorageError> {
    let content = store.export_all()?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "exported logs");
    Ok(())
}

/// Replaces the store's contents with the snapshot at the given path.
///
/// Returns the number of imported logs. The store is unchanged if the file
/// cannot be read or does not hold a JSON array.
pub fn import_from_path(store: &LogStore, path: &Path) -> Result<usize, StorageError> {
    let content = fs::read_to_string(path)?;
    store.import_all(&content)
}

/// Returns the default export path: `~/daybook-{YYYYMMDD}.json`.
///
/// Returns `StorageError::NoHomeDir` if the home directory cannot be
/// determined.
pub fn default_export_path(today: NaiveDate) -> Result<PathBuf, StorageError> {
    let filename = format!("daybook-{}.json", today.format("%Y%m%d"));
    let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
    Ok(home.join(filename))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::model::DailyLog;

    fn make_store() -> LogStore {
        let store = LogStore::in_memory();
        store.save(&DailyLog::empty("2024-02-16")).unwrap();
        store.save(&DailyLog::empty("2024-02-17")).unwrap();
        store
    }

    // --- export_to_path / import_from_path ---

    #[test]
    fn export_writes_pretty_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");

        export_to_path(&make_store(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"date\": \"2024-02-17\""));
    }

    #[test]
    fn export_then_import_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        let source = make_store();
        export_to_path(&source, &path).unwrap();

        let target = LogStore::in_memory();
        assert_eq!(import_from_path(&target, &path).unwrap(), 2);
        assert_eq!(target.list_all(), source.list_all());
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let store = make_store();
        let result = import_from_path(&store, &dir.path().join("missing.json"));
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(store.list_all().len(), 2);
    }

    #[test]
    fn import_file_with_object_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"logs": []}"#).unwrap();

        let store = make_store();
        let result = import_from_path(&store, &path);
        assert!(matches!(result, Err(StorageError::NotAnArray)));
        assert_eq!(store.list_all().len(), 2);
    }

    // --- default_export_path ---

    #[test]
    fn default_path_uses_date() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let path = default_export_path(today).unwrap();
        let filename = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(filename, "daybook-20260216.json");
    }

    #[test]
    fn default_path_is_in_home_directory() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let path = default_export_path(today).unwrap();
        let home = dirs::home_dir().unwrap();
        assert_eq!(path.parent().unwrap(), home);
    }
}
