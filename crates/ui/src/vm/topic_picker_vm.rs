use quiz_core::model::TopicSelection;

/// One line of the topic checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRowVm {
    pub number: usize,
    pub name: String,
    pub selected: bool,
}

/// What the participant typed at the topic prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicCommand {
    /// Flip the given 1-based topic numbers.
    Toggle(Vec<usize>),
    SelectAll,
    Clear,
    Confirm,
}

/// Parse topic-prompt input: numbers separated by commas or spaces,
/// `all`, `none`, or a blank line to confirm.
///
/// # Errors
///
/// Returns a message naming the first token that is not a known topic number.
pub fn parse_topic_command(input: &str, topic_count: usize) -> Result<TopicCommand, String> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "" | "done" => return Ok(TopicCommand::Confirm),
        "all" => return Ok(TopicCommand::SelectAll),
        "none" => return Ok(TopicCommand::Clear),
        _ => {}
    }

    let mut numbers = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        match token.parse::<usize>() {
            Ok(n) if (1..=topic_count).contains(&n) => numbers.push(n),
            _ => return Err(format!("Unknown topic: {token}")),
        }
    }
    Ok(TopicCommand::Toggle(numbers))
}

/// Checklist state behind the topic prompt.
pub struct TopicPickerVm {
    topics: Vec<String>,
    selection: TopicSelection,
}

impl TopicPickerVm {
    #[must_use]
    pub fn new(topics: Vec<String>) -> Self {
        Self {
            topics,
            selection: TopicSelection::new(),
        }
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<TopicRowVm> {
        self.topics
            .iter()
            .enumerate()
            .map(|(i, name)| TopicRowVm {
                number: i + 1,
                name: name.clone(),
                selected: self.selection.is_selected(name),
            })
            .collect()
    }

    /// Apply a command; returns `true` once the selection is confirmed.
    pub fn apply(&mut self, command: TopicCommand) -> bool {
        match command {
            TopicCommand::Toggle(numbers) => {
                for n in numbers {
                    if let Some(topic) = n.checked_sub(1).and_then(|i| self.topics.get(i)) {
                        self.selection.toggle(topic);
                    }
                }
                false
            }
            TopicCommand::SelectAll => {
                for topic in &self.topics {
                    self.selection.select(topic.as_str());
                }
                false
            }
            TopicCommand::Clear => {
                self.selection.clear();
                false
            }
            TopicCommand::Confirm => true,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &TopicSelection {
        &self.selection
    }

    /// Selected topic names in checklist order.
    #[must_use]
    pub fn selected_names(&self) -> Vec<&str> {
        self.topics
            .iter()
            .filter(|t| self.selection.is_selected(t))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> TopicPickerVm {
        TopicPickerVm::new(vec![
            "Licensing".into(),
            "Disclosure".into(),
            "Market Conduct".into(),
        ])
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_topic_command("", 3), Ok(TopicCommand::Confirm));
        assert_eq!(parse_topic_command(" ALL ", 3), Ok(TopicCommand::SelectAll));
        assert_eq!(parse_topic_command("none", 3), Ok(TopicCommand::Clear));
        assert_eq!(
            parse_topic_command("1, 3", 3),
            Ok(TopicCommand::Toggle(vec![1, 3]))
        );
        assert_eq!(
            parse_topic_command("4", 3),
            Err("Unknown topic: 4".to_owned())
        );
        assert!(parse_topic_command("0", 3).is_err());
        assert!(parse_topic_command("x", 3).is_err());
    }

    #[test]
    fn toggling_and_select_all() {
        let mut vm = picker();
        assert!(!vm.apply(TopicCommand::Toggle(vec![3, 1])));
        assert_eq!(vm.selected_names(), vec!["Licensing", "Market Conduct"]);
        assert!(vm.rows()[0].selected);
        assert!(!vm.rows()[1].selected);

        vm.apply(TopicCommand::Toggle(vec![1]));
        assert_eq!(vm.selected_names(), vec!["Market Conduct"]);

        vm.apply(TopicCommand::SelectAll);
        assert_eq!(vm.selection().len(), 3);
        vm.apply(TopicCommand::Clear);
        assert!(vm.selection().is_empty());
        assert!(vm.apply(TopicCommand::Confirm));
    }
}
