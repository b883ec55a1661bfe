//! Question set ingestion
//!
//! Parses an uploaded JSON payload into a question set and derives the
//! category roster from it. Any bad record rejects the whole payload.

use crate::models::{CategoryRoster, Question, QuestionSet};
use crate::{QuizError, Result, MAX_QUESTIONS_PER_CATEGORY};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// A validated upload, ready to hand to team setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedQuestions {
    pub questions: QuestionSet,
    pub roster: CategoryRoster,
}

/// Parse and validate a question set payload
pub fn parse_question_set(text: &str) -> Result<LoadedQuestions> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| QuizError::UploadError(format!("File is not valid JSON ({})", e)))?;

    let records = value.as_array().ok_or_else(|| {
        QuizError::UploadError("Expected a JSON array of questions".to_string())
    })?;
    if records.is_empty() {
        return Err(QuizError::UploadError(
            "The file contains no questions".to_string(),
        ));
    }

    let mut questions = QuestionSet::new();
    for (index, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or_else(|| {
            QuizError::UploadError(format!("Question {} is not an object", index + 1))
        })?;
        questions.push(parse_record(index, object)?);
    }

    let roster = CategoryRoster::from_questions(&questions);
    if let Some(category) = roster
        .categories()
        .iter()
        .find(|c| c.question_count > MAX_QUESTIONS_PER_CATEGORY)
    {
        return Err(QuizError::UploadError(format!(
            "Category \"{}\" has {} questions (max {})",
            category.name, category.question_count, MAX_QUESTIONS_PER_CATEGORY
        )));
    }

    Ok(LoadedQuestions { questions, roster })
}

/// Read and parse a question set file
pub async fn load_question_set(path: &Path) -> Result<LoadedQuestions> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        QuizError::UploadError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let loaded = parse_question_set(&text)?;
    log::info!(
        "Loaded {} questions in {} categories from {}",
        loaded.questions.len(),
        loaded.roster.len(),
        path.display()
    );
    Ok(loaded)
}

fn parse_record(index: usize, object: &Map<String, Value>) -> Result<Question> {
    let text_field = |field: &str| -> Result<String> {
        match object.get(field) {
            None | Some(Value::Null) => Err(missing(index, field)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(QuizError::UploadError(
                format!("Question {} has an empty \"{}\"", index + 1, field),
            )),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(QuizError::UploadError(format!(
                "Question {}: \"{}\" must be text",
                index + 1,
                field
            ))),
        }
    };

    let category = text_field("category")?;
    let question = text_field("question")?;
    let answer = text_field("answer")?;

    let points = match object.get("points") {
        None | Some(Value::Null) => return Err(missing(index, "points")),
        Some(Value::Number(n)) => parse_points(index, n)?,
        Some(_) => {
            return Err(QuizError::UploadError(format!(
                "Question {}: \"points\" must be a number",
                index + 1
            )))
        }
    };

    Ok(Question {
        category,
        question,
        answer,
        points,
    })
}

/// Whole numbers are accepted in any JSON spelling (`200`, `200.0`, `2e2`)
fn parse_points(index: usize, number: &Number) -> Result<i64> {
    if let Some(points) = number.as_i64() {
        return Ok(points);
    }
    let value = number.as_f64().unwrap_or(f64::NAN);
    if value.fract() != 0.0 {
        return Err(QuizError::UploadError(format!(
            "Question {}: \"points\" must be a whole number (got {})",
            index + 1,
            number
        )));
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(QuizError::UploadError(format!(
            "Question {}: \"points\" value {} is out of range",
            index + 1,
            number
        )));
    }
    Ok(value as i64)
}

fn missing(index: usize, field: &str) -> QuizError {
    QuizError::UploadError(format!("Question {} is missing \"{}\"", index + 1, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn upload_err(text: &str) -> String {
        match parse_question_set(text) {
            Err(QuizError::UploadError(msg)) => msg,
            other => panic!("expected upload error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_payload_derives_roster() {
        let text = r#"[
            {"category": "Science", "question": "H2O?", "answer": "Water", "points": 200},
            {"category": "History", "question": "1066?", "answer": "Hastings", "points": 200},
            {"category": "Science", "question": "NaCl?", "answer": "Salt", "points": 400}
        ]"#;
        let loaded = parse_question_set(text).unwrap();
        assert_eq!(loaded.questions.len(), 3);
        assert_eq!(
            loaded.roster.categories(),
            &[Category::new("Science", 2), Category::new("History", 1)]
        );
    }

    #[test]
    fn test_missing_answer_rejects_everything() {
        let text = r#"[
            {"category": "A", "question": "q1", "answer": "a1", "points": 200},
            {"category": "A", "question": "q2", "points": 400}
        ]"#;
        let msg = upload_err(text);
        assert!(msg.contains("Question 2"));
        assert!(msg.contains("answer"));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(upload_err("not json").contains("not valid JSON"));
        assert!(upload_err(r#"{"category": "A"}"#).contains("array"));
        assert!(upload_err("[]").contains("no questions"));
        assert!(upload_err("[42]").contains("not an object"));
    }

    #[test]
    fn test_rejects_bad_fields() {
        let empty = r#"[{"category": " ", "question": "q", "answer": "a", "points": 1}]"#;
        assert!(upload_err(empty).contains("empty \"category\""));

        let text_points = r#"[{"category": "A", "question": "q", "answer": "a", "points": "200"}]"#;
        assert!(upload_err(text_points).contains("must be a number"));

        let fraction = r#"[{"category": "A", "question": "q", "answer": "a", "points": 2.5}]"#;
        assert!(upload_err(fraction).contains("whole number"));

        let numeric_answer = r#"[{"category": "A", "question": "q", "answer": 7, "points": 1}]"#;
        assert!(upload_err(numeric_answer).contains("must be text"));
    }

    #[test]
    fn test_category_case_variants_share_a_column() {
        let text = r#"[
            {"category": "Art", "question": "q1", "answer": "a", "points": 200},
            {"category": "Music", "question": "q2", "answer": "a", "points": 200},
            {"category": "art", "question": "q3", "answer": "a", "points": 400}
        ]"#;
        let loaded = parse_question_set(text).unwrap();
        assert_eq!(
            loaded.roster.categories(),
            &[Category::new("Art", 2), Category::new("Music", 1)]
        );
    }

    #[test]
    fn test_whole_float_points_are_accepted() {
        let text = r#"[
            {"category": "A", "question": "q1", "answer": "a", "points": 200.0},
            {"category": "A", "question": "q2", "answer": "a", "points": 1e3},
            {"category": "A", "question": "q3", "answer": "a", "points": -4.0E2}
        ]"#;
        let loaded = parse_question_set(text).unwrap();
        let points: Vec<i64> = loaded.questions.iter().map(|q| q.points).collect();
        assert_eq!(points, vec![200, 1000, -400]);
    }

    #[test]
    fn test_fractional_and_huge_points_are_rejected() {
        let fraction = r#"[{"category": "A", "question": "q", "answer": "a", "points": 2.5}]"#;
        let msg = upload_err(fraction);
        assert!(msg.contains("whole number"));
        assert!(msg.contains("2.5"));

        let huge = r#"[{"category": "A", "question": "q", "answer": "a", "points": 1e19}]"#;
        assert!(upload_err(huge).contains("out of range"));
    }

    #[test]
    fn test_points_are_not_range_checked() {
        let text = r#"[{"category": "A", "question": "q", "answer": "a", "points": -50}]"#;
        let loaded = parse_question_set(text).unwrap();
        assert_eq!(loaded.questions.questions()[0].points, -50);
    }

    #[test]
    fn test_rejects_oversized_category() {
        let records: Vec<String> = (0..11)
            .map(|i| {
                format!(
                    r#"{{"category": "A", "question": "q{}", "answer": "a", "points": 200}}"#,
                    i
                )
            })
            .collect();
        let text = format!("[{}]", records.join(","));
        assert!(upload_err(&text).contains("max 10"));
    }
}
