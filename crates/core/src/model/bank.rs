use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use thiserror::Error;

use crate::model::question::QuestionRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("no questions available for the selected topics")]
    EmptySelection,
}

/// Questions grouped by topic, in the order topics were first seen.
///
/// Built once at startup and read-only afterwards, so it can be shared
/// behind an `Arc` by any number of sessions.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    groups: Vec<(String, Vec<QuestionRecord>)>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its topic group, creating the group on first sight.
    pub fn push(&mut self, record: QuestionRecord) {
        let slot = match self.index.get(record.topic()) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(record.topic().to_owned(), slot);
                self.groups.push((record.topic().to_owned(), Vec::new()));
                slot
            }
        };
        self.groups[slot].1.push(record);
    }

    /// Topic names in first-seen order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(topic, _)| topic.as_str())
    }

    #[must_use]
    pub fn contains_topic(&self, topic: &str) -> bool {
        self.index.contains_key(topic)
    }

    /// Questions for one topic in file order; empty for unknown topics.
    #[must_use]
    pub fn questions(&self, topic: &str) -> &[QuestionRecord] {
        match self.index.get(topic) {
            Some(&slot) => &self.groups[slot].1,
            None => &[],
        }
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of questions across all topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, qs)| qs.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every question belonging to one of `selected`.
    ///
    /// Unknown names are ignored and repeated names count once.
    #[must_use]
    pub fn pool<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&QuestionRecord> {
        let mut seen = Vec::with_capacity(selected.len());
        let mut pool = Vec::new();
        for topic in selected {
            let topic = topic.as_ref();
            if seen.contains(&topic) {
                continue;
            }
            seen.push(topic);
            pool.extend(self.questions(topic));
        }
        pool
    }

    /// Draw `min(count, pool size)` distinct questions uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns `BankError::EmptySelection` if the selected topics hold no questions.
    pub fn sample<S, R>(
        &self,
        selected: &[S],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<QuestionRecord>, BankError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut pool = self.pool(selected);
        if pool.is_empty() {
            return Err(BankError::EmptySelection);
        }
        pool.shuffle(rng);
        pool.truncate(count);
        Ok(pool.into_iter().cloned().collect())
    }
}

impl FromIterator<QuestionRecord> for QuestionBank {
    fn from_iter<I: IntoIterator<Item = QuestionRecord>>(iter: I) -> Self {
        let mut bank = Self::new();
        for record in iter {
            bank.push(record);
        }
        bank
    }
}
