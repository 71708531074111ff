//! CSV-backed question source and results log.

mod mapping;
mod question_file;
mod result_log;

pub use mapping::{QUESTION_COLUMNS, RESULT_COLUMNS};
pub use question_file::{CsvQuestionFile, LoadOptions, load_questions};
pub use result_log::CsvResultLog;
