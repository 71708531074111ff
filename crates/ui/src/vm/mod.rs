mod question_vm;
mod topic_picker_vm;

pub use question_vm::{feedback_lines, question_lines, result_line, save_warning};
pub use topic_picker_vm::{TopicCommand, TopicPickerVm, TopicRowVm, parse_topic_command};
