use std::fs;

use chrono::NaiveDate;
use quiz_core::model::ResultRecord;
use storage::{LoadOptions, Storage, StorageError};

const QUESTIONS: &str = "\
topic,question,correct_answer,wrong_answer_1,wrong_answer_2,wrong_answer_3,explanation,explanation_pages
Licensing,Who grants a CMS licence?,MAS,SGX,CPF Board,IRAS,Section 86 of the Act.,\"[41, 42]\"
Licensing,\"{'answer': 'Is dealing in securities a regulated activity?', 'part': 'IV'}\",Yes,No,Only for banks,Only offshore,Second Schedule.,
Market Conduct,What is insider trading?,Trading on inside information,Trading after hours,Short selling,Margin trading,Section 218.,[112]
";

fn build_result(name: &str, minute: u32, correct: usize) -> ResultRecord {
    let at = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(14, minute, 0)
        .unwrap();
    ResultRecord::new(name, at, correct, 10)
}

#[test]
fn csv_storage_loads_questions_and_round_trips_results() {
    let dir = tempfile::tempdir().unwrap();
    let questions_path = dir.path().join("question_bank.csv");
    let results_path = dir.path().join("quiz_results.csv");
    fs::write(&questions_path, QUESTIONS).unwrap();

    let storage = Storage::csv(&questions_path, &results_path, LoadOptions::default());

    let bank = storage.questions.load_bank().expect("load");
    assert_eq!(
        bank.topics().collect::<Vec<_>>(),
        vec!["Licensing", "Market Conduct"]
    );
    assert_eq!(bank.len(), 3);
    assert_eq!(
        bank.questions("Licensing")[1].question().display(),
        "Is dealing in securities a regulated activity?"
    );

    let names = ["Ada", "Grace", "Edsger", "Barbara"];
    for (i, name) in names.iter().enumerate() {
        storage
            .results
            .append_result(&build_result(name, i as u32, i + 5))
            .unwrap();
    }

    let listed = storage.results.list_results().unwrap();
    assert_eq!(
        listed.iter().map(ResultRecord::name).collect::<Vec<_>>(),
        names
    );
    assert_eq!(listed[2].score(), "7/10");

    let text = fs::read_to_string(&results_path).unwrap();
    let headers = text
        .lines()
        .filter(|l| l.starts_with("Name,"))
        .count();
    assert_eq!(headers, 1);
    assert_eq!(text.lines().count(), names.len() + 1);
}

#[test]
fn missing_question_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::csv(
        dir.path().join("nope.csv"),
        dir.path().join("results.csv"),
        LoadOptions::default(),
    );
    let err = storage.questions.load_bank().unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

#[test]
fn appending_to_existing_log_keeps_prior_rows() {
    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("quiz_results.csv");
    fs::write(
        &results_path,
        "Name,Date,Time,Score,Total Questions\nOld,2023-01-01,08:00:00,1/10,10\n",
    )
    .unwrap();

    let storage = Storage::csv(dir.path().join("q.csv"), &results_path, LoadOptions::default());
    storage
        .results
        .append_result(&build_result("New", 0, 9))
        .unwrap();

    let listed = storage.results.list_results().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name(), "Old");
    assert_eq!(listed[1].name(), "New");
}
