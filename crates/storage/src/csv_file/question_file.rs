use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use quiz_core::model::QuestionBank;

use super::mapping::{QuestionRow, check_question_headers};
use crate::repository::{QuestionSource, StorageError};

/// How strictly question rows are checked while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject malformed page lists and duplicate answers instead of recovering.
    pub strict: bool,
}

impl LoadOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parse a question file from any reader.
///
/// Rows are grouped by topic in file order; each record's id is its
/// 1-based data row number. In lenient mode a row with extra trailing
/// fields is kept and a row with too few fields is skipped, both with a
/// warning.
///
/// # Errors
///
/// Returns `StorageError::MissingColumn` for an incomplete header,
/// `StorageError::Csv` for unreadable input, and, in strict mode,
/// `StorageError::RaggedRow` or `StorageError::MalformedRecord` for rows
/// that fail validation.
pub fn load_questions<R: Read>(reader: R, options: LoadOptions) -> Result<QuestionBank, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    check_question_headers(&headers)?;

    let mut bank = QuestionBank::new();
    for (i, result) in reader.records().enumerate() {
        let row = i as u64 + 1;
        let fields = result?;
        let (expected, found) = (headers.len(), fields.len());
        if found != expected {
            if options.strict {
                return Err(StorageError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            if found < expected {
                tracing::warn!(row, expected, found, "question row is missing fields; skipping it");
                continue;
            }
            tracing::warn!(row, expected, found, "question row has extra fields; ignoring them");
        }

        let record = fields
            .deserialize::<QuestionRow>(Some(&headers))?
            .into_record(row, options.strict)
            .map_err(|source| StorageError::MalformedRecord { row, source })?;
        bank.push(record);
    }
    Ok(bank)
}

/// Question bank stored as a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvQuestionFile {
    path: PathBuf,
    options: LoadOptions,
}

impl CsvQuestionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: LoadOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for CsvQuestionFile {
    fn load_bank(&self) -> Result<QuestionBank, StorageError> {
        let file = File::open(&self.path)?;
        let bank = load_questions(file, self.options)?;
        tracing::debug!(
            path = %self.path.display(),
            topics = bank.topic_count(),
            questions = bank.len(),
            strict = self.options.strict,
            "loaded question bank"
        );
        Ok(bank)
    }
}
