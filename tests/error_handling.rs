use quizboard::error;
use quizboard::io::{load_question_set, parse_question_set};
use quizboard::QuizError;
use std::io::{Error, ErrorKind};
use tempfile::TempDir;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&QuizError::IoError(Error::new(
        ErrorKind::NotFound,
        "gone",
    )));
    assert!(msg.contains("File not found"));

    let err = QuizError::ValidationError("Category name cannot be empty".into());
    assert_eq!(error::title(&err), "Missing information");
    assert_eq!(
        error::user_friendly_message(&err),
        "Category name cannot be empty"
    );

    let err = QuizError::ExportError("disk full".into());
    assert!(error::user_friendly_message(&err).contains("without a saved copy"));
}

#[test]
fn test_json_errors_become_upload_errors() {
    let err: QuizError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, QuizError::UploadError(_)));
    assert_eq!(error::title(&err), "Could not load questions");
}

#[test]
fn test_whole_upload_rejected_on_one_bad_record() {
    let payload = r#"[
        {"category": "A", "question": "q1", "answer": "a1", "points": 200},
        {"category": "A", "question": "", "answer": "a2", "points": 400}
    ]"#;
    match parse_question_set(payload) {
        Err(QuizError::UploadError(msg)) => assert!(msg.contains("Question 2")),
        other => panic!("expected upload error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreadable_upload_path() {
    let dir = TempDir::new().unwrap();
    let result = load_question_set(&dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(QuizError::UploadError(_))));
}
