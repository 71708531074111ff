use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::literal::Literal;
use crate::model::answer::AnswerText;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Problems found when validating a question record strictly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("answer texts are not distinct: {text:?} appears more than once")]
    DuplicateAnswer { text: String },

    #[error("malformed explanation_pages {raw:?}")]
    MalformedPages { raw: String },
}

//
// ─── PAGES ────────────────────────────────────────────────────────────────────
//

/// Parse an `explanation_pages` cell such as `[12, 13]`.
///
/// A blank cell means no pages. Numbers are kept as written, sign included.
///
/// # Errors
///
/// Returns `QuestionError::MalformedPages` if the cell is not a sequence of
/// page numbers.
pub fn parse_pages(raw: &str) -> Result<Vec<i64>, QuestionError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let malformed = || QuestionError::MalformedPages {
        raw: raw.to_owned(),
    };
    let lit = Literal::parse(raw).map_err(|_| malformed())?;
    let items = lit.as_sequence().ok_or_else(malformed)?;
    items
        .iter()
        .map(|item| item.to_int().ok_or_else(malformed))
        .collect()
}

//
// ─── ANSWER LETTER ────────────────────────────────────────────────────────────
//

/// Label of one of the four presented options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        };
        write!(f, "{c}")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not an answer letter: {raw:?}")]
pub struct ParseLetterError {
    pub raw: String,
}

impl FromStr for AnswerLetter {
    type Err = ParseLetterError;

    /// Accepts a lone letter, optionally followed by `.` and the option text,
    /// so `"b"` and `"B. Some text"` parse but `"dunno"` does not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLetterError { raw: s.to_owned() };
        let mut chars = s.trim().chars();
        let letter = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('A') => Self::A,
            Some('B') => Self::B,
            Some('C') => Self::C,
            Some('D') => Self::D,
            _ => return Err(err()),
        };
        match chars.next() {
            None | Some('.') => Ok(letter),
            Some(_) => Err(err()),
        }
    }
}

//
// ─── QUESTION RECORD ──────────────────────────────────────────────────────────
//

/// One multiple-choice question with a single correct answer and three distractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    id: QuestionId,
    topic: String,
    question: AnswerText,
    correct_answer: AnswerText,
    wrong_answers: [AnswerText; 3],
    explanation: String,
    explanation_pages: Vec<i64>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        id: QuestionId,
        topic: impl Into<String>,
        question: AnswerText,
        correct_answer: AnswerText,
        wrong_answers: [AnswerText; 3],
    ) -> Self {
        Self {
            id,
            topic: topic.into(),
            question,
            correct_answer,
            wrong_answers,
            explanation: String::new(),
            explanation_pages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>, pages: Vec<i64>) -> Self {
        self.explanation = explanation.into();
        self.explanation_pages = pages;
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn question(&self) -> &AnswerText {
        &self.question
    }

    #[must_use]
    pub fn correct_answer(&self) -> &AnswerText {
        &self.correct_answer
    }

    #[must_use]
    pub fn wrong_answers(&self) -> &[AnswerText; 3] {
        &self.wrong_answers
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn explanation_pages(&self) -> &[i64] {
        &self.explanation_pages
    }

    /// All four answers, correct one first.
    #[must_use]
    pub fn answers(&self) -> [&AnswerText; 4] {
        [
            &self.correct_answer,
            &self.wrong_answers[0],
            &self.wrong_answers[1],
            &self.wrong_answers[2],
        ]
    }

    /// Grade a chosen answer text against the correct one after normalization.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer.display()
    }

    /// Check that the four answer texts are pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateAnswer` naming the first repeated text.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let answers = self.answers();
        for (i, a) in answers.iter().enumerate() {
            if answers[..i].iter().any(|b| b.display() == a.display()) {
                return Err(QuestionError::DuplicateAnswer {
                    text: a.display().to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Draw a fresh presentation order of the four answers.
    pub fn present<R: Rng + ?Sized>(&self, rng: &mut R) -> PresentedQuestion<'_> {
        let mut order = [0, 1, 2, 3];
        order.shuffle(rng);
        PresentedQuestion {
            record: self,
            order,
        }
    }

    /// Present with a known order, e.g. to redisplay a cached shuffle.
    ///
    /// Returns `None` unless `order` is a permutation of `0..4`.
    #[must_use]
    pub fn present_in_order(&self, order: [usize; 4]) -> Option<PresentedQuestion<'_>> {
        let mut seen = [false; 4];
        for &i in &order {
            if i >= 4 || seen[i] {
                return None;
            }
            seen[i] = true;
        }
        Some(PresentedQuestion {
            record: self,
            order,
        })
    }
}

//
// ─── PRESENTATION ─────────────────────────────────────────────────────────────
//

/// A question with its four answers in a fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedQuestion<'a> {
    record: &'a QuestionRecord,
    order: [usize; 4],
}

impl<'a> PresentedQuestion<'a> {
    #[must_use]
    pub fn record(&self) -> &'a QuestionRecord {
        self.record
    }

    #[must_use]
    pub fn order(&self) -> [usize; 4] {
        self.order
    }

    /// The answer text labelled by `letter`.
    #[must_use]
    pub fn text_for(&self, letter: AnswerLetter) -> &'a str {
        self.record.answers()[self.order[letter.index()]].display()
    }

    /// Display texts in presentation order, A through D.
    #[must_use]
    pub fn options(&self) -> [(AnswerLetter, &'a str); 4] {
        AnswerLetter::ALL.map(|letter| (letter, self.text_for(letter)))
    }

    /// The letter currently labelling the correct answer.
    #[must_use]
    pub fn correct_letter(&self) -> AnswerLetter {
        let pos = self.order.iter().position(|&i| i == 0).unwrap_or(0);
        AnswerLetter::from_index(pos).unwrap_or(AnswerLetter::A)
    }

    /// Grade a letter against this presentation.
    #[must_use]
    pub fn grade(&self, letter: AnswerLetter) -> bool {
        self.record.is_correct(self.text_for(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record() -> QuestionRecord {
        QuestionRecord::new(
            QuestionId::new(1),
            "Licensing",
            AnswerText::plain("Who grants a capital markets services licence?"),
            AnswerText::plain("MAS"),
            [
                AnswerText::plain("SGX"),
                AnswerText::plain("CPF Board"),
                AnswerText::plain("IRAS"),
            ],
        )
        .with_explanation("MAS may grant a licence.", vec![12, 13])
    }

    #[test]
    fn pages_parse_from_list_literal() {
        assert_eq!(parse_pages("[12, 13]").unwrap(), vec![12, 13]);
        assert_eq!(parse_pages("('4', 5.0)").unwrap(), vec![4, 5]);
        assert_eq!(parse_pages("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_pages("   ").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_pages("[-1, 0]").unwrap(), vec![-1, 0]);
    }

    #[test]
    fn malformed_pages_are_reported() {
        for raw in ["12, 13", "[12, 'x']", "[1.5e400]", "{'page': 1}", "pages 4"] {
            assert!(
                matches!(parse_pages(raw), Err(QuestionError::MalformedPages { .. })),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn letters_parse_case_insensitively() {
        assert_eq!("b".parse::<AnswerLetter>().unwrap(), AnswerLetter::B);
        assert_eq!(" D. IRAS".parse::<AnswerLetter>().unwrap(), AnswerLetter::D);
        assert_eq!("c.".parse::<AnswerLetter>().unwrap(), AnswerLetter::C);
        assert!("E".parse::<AnswerLetter>().is_err());
        assert!("".parse::<AnswerLetter>().is_err());
    }

    #[test]
    fn words_starting_with_a_letter_are_not_letters() {
        for raw in ["dunno", "banana", "apple", "cancel", "A B", "b)"] {
            assert!(raw.parse::<AnswerLetter>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn presentation_keeps_the_same_four_texts() {
        let record = record();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let presented = record.present(&mut rng);
            let mut shown: Vec<_> = presented.options().iter().map(|(_, t)| *t).collect();
            shown.sort_unstable();
            let mut expected: Vec<_> = record.answers().iter().map(|a| a.display()).collect();
            expected.sort_unstable();
            assert_eq!(shown, expected);
        }
    }

    #[test]
    fn correct_letter_always_grades_correct() {
        let record = record();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let presented = record.present(&mut rng);
            let correct = presented.correct_letter();
            assert!(presented.grade(correct));
            assert_eq!(presented.text_for(correct), "MAS");
            for letter in AnswerLetter::ALL {
                if letter != correct {
                    assert!(!presented.grade(letter));
                }
            }
        }
    }

    #[test]
    fn present_in_order_rejects_non_permutations() {
        let record = record();
        assert!(record.present_in_order([0, 0, 1, 2]).is_none());
        assert!(record.present_in_order([0, 1, 2, 4]).is_none());
        let presented = record.present_in_order([3, 2, 1, 0]).unwrap();
        assert_eq!(presented.correct_letter(), AnswerLetter::D);
    }

    #[test]
    fn validate_flags_duplicate_answers() {
        assert!(record().validate().is_ok());
        let dup = QuestionRecord::new(
            QuestionId::new(2),
            "Licensing",
            AnswerText::plain("Q"),
            AnswerText::parse("{'answer': 'MAS'}"),
            [
                AnswerText::plain("MAS"),
                AnswerText::plain("B"),
                AnswerText::plain("C"),
            ],
        );
        assert_eq!(
            dup.validate(),
            Err(QuestionError::DuplicateAnswer { text: "MAS".into() })
        );
    }
}
