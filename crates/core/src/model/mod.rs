mod answer;
mod bank;
mod ids;
mod question;
mod result;
mod selection;

pub use answer::AnswerText;
pub use bank::{BankError, QuestionBank};
pub use ids::{ParseIdError, QuestionId};
pub use question::{
    AnswerLetter, ParseLetterError, PresentedQuestion, QuestionError, QuestionRecord, parse_pages,
};
pub use result::ResultRecord;
pub use selection::TopicSelection;
