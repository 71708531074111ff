use quiz_core::model::{QuestionBank, QuestionError, ResultRecord};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::csv_file::{CsvQuestionFile, CsvResultLog, LoadOptions};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column: {column}")]
    MissingColumn { column: &'static str },

    #[error("row {row}: {source}")]
    MalformedRecord {
        row: u64,
        #[source]
        source: QuestionError,
    },

    #[error("row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: u64,
        expected: usize,
        found: usize,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Source of the question bank, read once at startup.
pub trait QuestionSource: Send + Sync {
    /// Load every question grouped by topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or is missing columns.
    fn load_bank(&self) -> Result<QuestionBank, StorageError>;
}

/// Append-only log of finished sessions.
pub trait ResultLog: Send + Sync {
    /// Append one result; never rewrites earlier entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be written.
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError>;

    /// Read all results back in append order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read or decoded.
    fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    bank: Arc<QuestionBank>,
    results: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bank(bank: QuestionBank) -> Self {
        Self {
            bank: Arc::new(bank),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl QuestionSource for InMemoryRepository {
    fn load_bank(&self) -> Result<QuestionBank, StorageError> {
        Ok(self.bank.as_ref().clone())
    }
}

impl ResultLog for InMemoryRepository {
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }

    fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Aggregates the question source and result log behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
    pub results: Arc<dyn ResultLog>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(bank: QuestionBank) -> Self {
        let repo = InMemoryRepository::with_bank(bank);
        let questions: Arc<dyn QuestionSource> = Arc::new(repo.clone());
        let results: Arc<dyn ResultLog> = Arc::new(repo);
        Self { questions, results }
    }

    /// CSV question file plus CSV results log.
    #[must_use]
    pub fn csv(
        questions_path: impl Into<PathBuf>,
        results_path: impl Into<PathBuf>,
        options: LoadOptions,
    ) -> Self {
        Self {
            questions: Arc::new(CsvQuestionFile::new(questions_path).with_options(options)),
            results: Arc::new(CsvResultLog::new(results_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn build_result(name: &str, correct: usize) -> ResultRecord {
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        ResultRecord::new(name, at, correct, 10)
    }

    #[test]
    fn in_memory_log_keeps_append_order() {
        let repo = InMemoryRepository::new();
        repo.append_result(&build_result("Ada", 7)).unwrap();
        repo.append_result(&build_result("Grace", 9)).unwrap();

        let listed = repo.list_results().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name(), "Ada");
        assert_eq!(listed[1].score(), "9/10");
    }

    #[test]
    fn in_memory_storage_shares_one_log() {
        let storage = Storage::in_memory(QuestionBank::new());
        storage.results.append_result(&build_result("Ada", 1)).unwrap();
        assert_eq!(storage.results.list_results().unwrap().len(), 1);
        assert!(storage.questions.load_bank().unwrap().is_empty());
    }
}
