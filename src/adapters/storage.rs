use crate::core::{CounterRecord, CounterStore};
use crate::utils::error::{Result, TicketError};
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keeps the counter record as a small JSON file.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so readers only ever see the old or the new record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> std::result::Result<CounterRecord, String> {
        let data = fs::read(&self.path).map_err(|e| e.to_string())?;
        serde_json::from_slice(&data).map_err(|e| e.to_string())
    }

    fn save_error(&self, source: std::io::Error) -> TicketError {
        TicketError::StateSave {
            path: self.path.clone(),
            source,
        }
    }

    fn atomic_write(&self, data: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.save_error(e))?;
        temp.write_all(data).map_err(|e| self.save_error(e))?;
        temp.as_file().sync_all().map_err(|e| self.save_error(e))?;

        // persist 失敗時暫存檔會隨 drop 一起刪除
        temp.persist(&self.path)
            .map_err(|e| self.save_error(e.error))?;
        Ok(())
    }
}

impl CounterStore for JsonFileStore {
    fn load(&self, today: NaiveDate) -> CounterRecord {
        match self.read_record() {
            Ok(record) => record,
            Err(reason) => {
                if self.path.exists() {
                    tracing::warn!(
                        path = %self.path.display(),
                        %reason,
                        "⚠️ Counter state unreadable, starting from zero"
                    );
                } else {
                    tracing::debug!(
                        path = %self.path.display(),
                        "No counter state yet, starting from zero"
                    );
                }
                CounterRecord::starting(today)
            }
        }
    }

    fn save(&self, record: &CounterRecord) -> Result<()> {
        let json = serde_json::to_vec(record)?;
        self.atomic_write(&json)?;
        tracing::debug!(
            path = %self.path.display(),
            date = %record.date,
            count = record.count,
            "Counter state saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_file_defaults_to_today() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("counter.json"));

        assert_eq!(store.load(day(2024, 12, 31)), CounterRecord::starting(day(2024, 12, 31)));
    }

    #[test]
    fn test_corrupt_file_defaults_to_today() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter.json");
        fs::write(&path, b"{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(day(2024, 12, 31)), CounterRecord::starting(day(2024, 12, 31)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter.json");
        let store = JsonFileStore::new(&path);

        store.save(&CounterRecord::new(day(2024, 12, 31), 7)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"date":"12/31/2024","count":7}"#
        );
        assert_eq!(store.load(day(2025, 1, 1)), CounterRecord::new(day(2024, 12, 31), 7));
    }

    #[test]
    fn test_reads_state_written_with_unpadded_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counter.json");
        fs::write(&path, r#"{"date":"3/7/2025","count":12}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(day(2025, 3, 7)), CounterRecord::new(day(2025, 3, 7), 12));
    }

    #[test]
    fn test_failed_save_leaves_target_untouched() {
        let dir = TempDir::new().unwrap();
        // 目標路徑是目錄，rename 一定失敗
        let target = dir.path().join("counter.json");
        fs::create_dir(&target).unwrap();

        let store = JsonFileStore::new(&target);
        let err = store
            .save(&CounterRecord::new(day(2024, 12, 31), 1))
            .unwrap_err();

        assert!(matches!(err, TicketError::StateSave { .. }));
        assert!(target.is_dir());
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("counter.json")]);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("counter.json"));

        assert!(store.save(&CounterRecord::new(day(2024, 12, 31), 1)).is_err());
    }

    #[test]
    fn test_path_reports_configured_location() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("state").join("counter.json");

        let store = JsonFileStore::new(&target);
        assert_eq!(store.path(), target.as_path());
    }
}
