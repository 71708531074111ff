#![forbid(unsafe_code)]

pub mod csv_file;
pub mod repository;

pub use csv_file::{CsvQuestionFile, CsvResultLog, LoadOptions, load_questions};
pub use repository::{InMemoryRepository, QuestionSource, ResultLog, Storage, StorageError};
