use chrono::NaiveDateTime;

/// Outcome of a finished session as written to the results log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    name: String,
    completed_at: NaiveDateTime,
    correct: usize,
    total: usize,
}

impl ResultRecord {
    /// `completed_at` is wall-clock time in the zone the log is kept in.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        completed_at: NaiveDateTime,
        correct: usize,
        total: usize,
    ) -> Self {
        Self {
            name: name.into(),
            completed_at,
            correct,
            total,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn completed_at(&self) -> NaiveDateTime {
        self.completed_at
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// `YYYY-MM-DD`
    #[must_use]
    pub fn date(&self) -> String {
        self.completed_at.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM:SS`
    #[must_use]
    pub fn time(&self) -> String {
        self.completed_at.format("%H:%M:%S").to_string()
    }

    /// Score as `"correct/total"`.
    #[must_use]
    pub fn score(&self) -> String {
        format!("{}/{}", self.correct, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_log_columns() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 3)
            .unwrap();
        let record = ResultRecord::new("Ada", at, 7, 10);
        assert_eq!(record.date(), "2024-03-05");
        assert_eq!(record.time(), "09:07:03");
        assert_eq!(record.score(), "7/10");
        assert_eq!(record.total(), 10);
    }
}
