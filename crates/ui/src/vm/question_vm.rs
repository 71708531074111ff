use services::{AnswerFeedback, FinalResult, QuestionView, SaveStatus};

/// Lines shown for one question: the numbered prompt, then `A. …` to `D. …`.
#[must_use]
pub fn question_lines(view: &QuestionView) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);
    lines.push(format!("{}. {}", view.number, view.text));
    lines.extend(
        view.options
            .iter()
            .map(|(letter, text)| format!("{letter}. {text}")),
    );
    lines
}

/// Lines shown after an answer is graded.
#[must_use]
pub fn feedback_lines(feedback: &AnswerFeedback) -> Vec<String> {
    let mut lines = Vec::new();
    if feedback.was_correct {
        lines.push("Correct!".to_owned());
    } else {
        lines.push(format!(
            "Wrong! The correct answer was: {}",
            feedback.correct_text
        ));
    }

    lines.push(String::new());
    lines.push("Quote from text:".to_owned());
    lines.push(feedback.explanation.clone());

    if !feedback.explanation_pages.is_empty() {
        let pages: Vec<String> = feedback
            .explanation_pages
            .iter()
            .map(i64::to_string)
            .collect();
        lines.push(String::new());
        lines.push(format!("Relevant Pages: {}", pages.join(", ")));
    }

    if !feedback.is_finished {
        lines.push(String::new());
        lines.push("Moving to next question...".to_owned());
    }
    lines
}

#[must_use]
pub fn result_line(result: &FinalResult) -> String {
    format!(
        "{}, you got {} out of {} correct!",
        result.name, result.correct, result.total
    )
}

/// Warning for a score that was computed but not written to the log.
#[must_use]
pub fn save_warning(status: &SaveStatus) -> Option<String> {
    match status {
        SaveStatus::Saved => None,
        SaveStatus::Failed { reason } => Some(format!(
            "Warning: your score was computed but could not be saved ({reason})."
        )),
    }
}
