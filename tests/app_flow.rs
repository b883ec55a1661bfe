//! End-to-end flows through the app controller, driven by key events

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quizboard::app::{App, AppState, NotificationLevel};
use quizboard::config::GameConfig;
use quizboard::game::PlayState;
use quizboard::io::parse_question_set;
use quizboard::EXPORT_FILE;
use std::fs;
use tempfile::TempDir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn press(app: &mut App, code: KeyCode) {
    app.handle_key(key(code)).await;
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

fn test_app(export_dir: &TempDir) -> App {
    App::new(GameConfig::default().with_export_dir(export_dir.path().to_path_buf()))
}

#[tokio::test]
async fn test_manual_entry_game_flow() {
    let dir = TempDir::new().unwrap();
    let mut app = test_app(&dir);

    // Landing -> category setup
    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::CategorySetup);

    // The count applies to categories added after it is set
    press(&mut app, KeyCode::Tab).await;
    for _ in 0..4 {
        press(&mut app, KeyCode::Down).await;
    }
    press(&mut app, KeyCode::BackTab).await;
    type_text(&mut app, "Science").await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::BackTab).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::ManualEntry);

    type_text(&mut app, "Closest star?").await;
    press(&mut app, KeyCode::Enter).await;
    type_text(&mut app, "The Sun").await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::TeamSetup);

    // The finished set was exported and reloads cleanly
    let exported = fs::read_to_string(dir.path().join(EXPORT_FILE)).unwrap();
    let loaded = parse_question_set(&exported).unwrap();
    assert_eq!(loaded.questions.len(), 1);
    assert_eq!(loaded.questions.questions()[0].points, 200);
    assert_eq!(
        app.notification().map(|n| n.level),
        Some(NotificationLevel::Success)
    );

    type_text(&mut app, "Red").await;
    press(&mut app, KeyCode::Enter).await;
    type_text(&mut app, "Blue").await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::BackTab).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::Board);

    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char('c')).await;

    let session = app.board_screen().unwrap().session();
    assert_eq!(session.teams()[0].score, 200);
    assert_eq!(session.teams()[1].score, 0);
    assert_eq!(session.turn(), 1);
    assert!(session.is_finished());

    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::Landing);
    assert!(app.board_screen().is_none());
}

#[tokio::test]
async fn test_rejected_upload_stays_on_upload_screen() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"[{"category": "A", "question": "q", "answer": "a"}]"#).unwrap();

    let mut app = test_app(&dir);
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::Upload);

    type_text(&mut app, bad.to_str().unwrap()).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::Upload);
    let notification = app.notification().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert!(notification.message.contains("points"));

    // Esc closes the notification first, then leaves the screen
    press(&mut app, KeyCode::Esc).await;
    assert!(app.notification().is_none());
    assert_eq!(app.current_state(), AppState::Upload);
    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.current_state(), AppState::Landing);
}

#[tokio::test]
async fn test_preloaded_questions_play_without_teams() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("questions.json");
    fs::write(
        &file,
        r#"[
            {"category": "Art", "question": "q1", "answer": "a1", "points": 200},
            {"category": "Art", "question": "q2", "answer": "a2", "points": 400},
            {"category": "Music", "question": "q3", "answer": "a3", "points": 200}
        ]"#,
    )
    .unwrap();

    let mut app = test_app(&dir);
    app.open_question_file(&file).await;
    assert_eq!(app.current_state(), AppState::TeamSetup);
    assert_eq!(app.team_screen().unwrap().builder().len(), 0);

    // Start is one BackTab away from the name field
    press(&mut app, KeyCode::BackTab).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::Board);

    let session = app.board_screen().unwrap().session();
    assert!(!session.has_teams());
    assert_eq!(session.remaining_cells(), 3);

    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Enter).await;
    assert!(matches!(
        app.board_screen().unwrap().session().state(),
        PlayState::AnswerShown { .. }
    ));
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.board_screen().unwrap().session().remaining_cells(), 2);

    // The first Esc only closes the load notification; the second leaves
    // mid-game, which discards the game and says so
    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.current_state(), AppState::Board);
    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.current_state(), AppState::Landing);
    assert_eq!(
        app.notification().map(|n| n.level),
        Some(NotificationLevel::Info)
    );
}

#[tokio::test]
async fn test_missing_file_keeps_landing() {
    let dir = TempDir::new().unwrap();
    let mut app = test_app(&dir);
    app.open_question_file(&dir.path().join("nope.json")).await;
    assert_eq!(app.current_state(), AppState::Landing);
    assert_eq!(
        app.notification().map(|n| n.level),
        Some(NotificationLevel::Error)
    );
}

#[tokio::test]
async fn test_quit_keys() {
    let dir = TempDir::new().unwrap();
    let mut app = test_app(&dir);

    // q is text on the upload screen
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::Char('q')).await;
    assert!(!app.should_quit());

    press(&mut app, KeyCode::Esc).await;
    press(&mut app, KeyCode::Char('q')).await;
    assert!(app.should_quit());

    let mut app = test_app(&dir);
    press(&mut app, KeyCode::Enter).await;
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        .await;
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_back_from_entry_keeps_categories() {
    let dir = TempDir::new().unwrap();
    let mut app = test_app(&dir);

    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Enter).await;
    type_text(&mut app, "History").await;
    press(&mut app, KeyCode::Enter).await;
    press(&mut app, KeyCode::BackTab).await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::ManualEntry);

    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.current_state(), AppState::CategorySetup);

    // The roster is still there, so continuing works straight away
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.current_state(), AppState::ManualEntry);
}
