use crate::model::bank::QuestionBank;

/// The set of topics a participant has ticked, before the quiz starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSelection {
    selected: Vec<String>,
}

impl TopicSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a topic; selecting twice is a no-op.
    pub fn select(&mut self, topic: impl Into<String>) {
        let topic = topic.into();
        if !self.selected.contains(&topic) {
            self.selected.push(topic);
        }
    }

    pub fn deselect(&mut self, topic: &str) {
        self.selected.retain(|t| t != topic);
    }

    /// Flip a topic and return whether it is now selected.
    pub fn toggle(&mut self, topic: &str) -> bool {
        if self.is_selected(topic) {
            self.deselect(topic);
            false
        } else {
            self.select(topic);
            true
        }
    }

    /// Select every topic the bank knows.
    pub fn select_all(&mut self, bank: &QuestionBank) {
        for topic in bank.topics() {
            self.select(topic);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_selected(&self, topic: &str) -> bool {
        self.selected.iter().any(|t| t == topic)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected topics in the bank's topic order, then any unknown names.
    #[must_use]
    pub fn ordered(&self, bank: &QuestionBank) -> Vec<String> {
        let mut out: Vec<String> = bank
            .topics()
            .filter(|t| self.is_selected(t))
            .map(str::to_owned)
            .collect();
        out.extend(
            self.selected
                .iter()
                .filter(|t| !bank.contains_topic(t))
                .cloned(),
        );
        out
    }
}

impl<S: Into<String>> FromIterator<S> for TopicSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for topic in iter {
            selection.select(topic);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerText, QuestionId, QuestionRecord};

    fn build_bank() -> QuestionBank {
        ["Licensing", "Disclosure", "Market Conduct"]
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                QuestionRecord::new(
                    QuestionId::new(i as u64 + 1),
                    *topic,
                    AnswerText::plain("Q"),
                    AnswerText::plain("A"),
                    [
                        AnswerText::plain("B"),
                        AnswerText::plain("C"),
                        AnswerText::plain("D"),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn select_all_then_clear() {
        let bank = build_bank();
        let mut selection = TopicSelection::new();
        selection.select_all(&bank);
        assert_eq!(selection.len(), 3);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = TopicSelection::new();
        assert!(selection.toggle("Licensing"));
        assert!(selection.is_selected("Licensing"));
        assert!(!selection.toggle("Licensing"));
        assert!(selection.is_empty());
    }

    #[test]
    fn ordered_follows_bank_order() {
        let bank = build_bank();
        let selection: TopicSelection = ["Market Conduct", "Ghost", "Licensing", "Licensing"]
            .into_iter()
            .collect();
        assert_eq!(
            selection.ordered(&bank),
            vec!["Licensing", "Market Conduct", "Ghost"]
        );
    }
}
