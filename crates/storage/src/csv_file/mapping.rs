use chrono::NaiveDateTime;
use csv::StringRecord;
use quiz_core::model::{AnswerText, QuestionError, QuestionId, QuestionRecord, ResultRecord, parse_pages};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Columns every question file must carry, in any order.
pub const QUESTION_COLUMNS: [&str; 8] = [
    "topic",
    "question",
    "correct_answer",
    "wrong_answer_1",
    "wrong_answer_2",
    "wrong_answer_3",
    "explanation",
    "explanation_pages",
];

/// Header of the results log.
pub const RESULT_COLUMNS: [&str; 5] = ["Name", "Date", "Time", "Score", "Total Questions"];

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn check_question_headers(headers: &StringRecord) -> Result<(), StorageError> {
    for column in QUESTION_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(StorageError::MissingColumn { column });
        }
    }
    Ok(())
}

/// One raw data row of a question file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QuestionRow {
    topic: String,
    question: String,
    correct_answer: String,
    wrong_answer_1: String,
    wrong_answer_2: String,
    wrong_answer_3: String,
    explanation: String,
    explanation_pages: String,
}

impl QuestionRow {
    /// Convert a row into a domain record.
    ///
    /// Lenient mode swallows malformed page lists as "no pages"; strict mode
    /// reports them, along with duplicate answer texts.
    pub(crate) fn into_record(self, row: u64, strict: bool) -> Result<QuestionRecord, QuestionError> {
        let pages = match parse_pages(&self.explanation_pages) {
            Ok(pages) => pages,
            Err(err) if strict => return Err(err),
            Err(_) => {
                tracing::warn!(
                    row,
                    raw = %self.explanation_pages,
                    "malformed explanation_pages; treating as no pages"
                );
                Vec::new()
            }
        };

        let record = QuestionRecord::new(
            QuestionId::new(row),
            self.topic,
            AnswerText::parse(&self.question),
            AnswerText::parse(&self.correct_answer),
            [
                AnswerText::parse(&self.wrong_answer_1),
                AnswerText::parse(&self.wrong_answer_2),
                AnswerText::parse(&self.wrong_answer_3),
            ],
        )
        .with_explanation(self.explanation, pages);

        if let Err(err) = record.validate() {
            if strict {
                return Err(err);
            }
            tracing::warn!(row, error = %err, "question answers are not distinct");
        }
        Ok(record)
    }
}

/// One row of the results log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ResultRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Score")]
    score: String,
    #[serde(rename = "Total Questions")]
    total_questions: usize,
}

impl ResultRow {
    pub(crate) fn from_record(record: &ResultRecord) -> Self {
        Self {
            name: record.name().to_owned(),
            date: record.date(),
            time: record.time(),
            score: record.score(),
            total_questions: record.total(),
        }
    }

    pub(crate) fn into_record(self) -> Result<ResultRecord, StorageError> {
        let completed_at =
            NaiveDateTime::parse_from_str(&format!("{} {}", self.date, self.time), DATE_TIME_FORMAT)
                .map_err(ser)?;
        let correct = self
            .score
            .split_once('/')
            .and_then(|(correct, _)| correct.trim().parse::<usize>().ok())
            .ok_or_else(|| StorageError::Serialization(format!("invalid score: {}", self.score)))?;
        Ok(ResultRecord::new(
            self.name,
            completed_at,
            correct,
            self.total_questions,
        ))
    }
}
