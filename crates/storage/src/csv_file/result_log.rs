use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quiz_core::model::ResultRecord;

use super::mapping::{RESULT_COLUMNS, ResultRow};
use crate::repository::{ResultLog, StorageError};

/// Results log kept as an append-only CSV file.
///
/// The header row is written when the file is first created (or found empty).
/// Appends from one process are serialized so rows never interleave.
#[derive(Debug)]
pub struct CsvResultLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvResultLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultLog for CsvResultLog {
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(ResultRow::from_record(record))?;
        writer.flush()?;

        tracing::debug!(
            path = %self.path.display(),
            name = record.name(),
            score = %record.score(),
            "appended quiz result"
        );
        Ok(())
    }

    fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader.headers()?;
        if let Some(column) = RESULT_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(StorageError::MissingColumn { column });
        }
        reader
            .deserialize::<ResultRow>()
            .map(|row| row?.into_record())
            .collect()
    }
}
