//! Store-backed authoring and grading commands.
//!
//! Each command fetches the school document, works on one test and
//! replaces the document, the same read-modify-write the web pages do.

use std::fmt::Write;

use tracing::{debug, info};

use crate::data::DocumentStore;
use crate::editor::{EditError, TestEditor};
use crate::grading::{AnswerReview, Attempt, Student};
use crate::import::letter_index;
use crate::models::{Test, TestResult};
use crate::QuizError;

/// One line of the test listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    pub id: String,
    pub title: String,
    pub questions: usize,
}

/// A graded attempt together with its per-question review.
#[derive(Debug, Clone)]
pub struct Graded {
    pub result: TestResult,
    pub review: Vec<AnswerReview>,
}

/// Best score of one student on one test; `None` if never taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestScore {
    pub test_id: String,
    pub title: String,
    pub best: Option<u32>,
}

/// What a student's dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProgress {
    pub viewed_lectures: Vec<String>,
    pub passed_tests: Vec<String>,
    pub scores: Vec<TestScore>,
}

pub fn create_test<S: DocumentStore>(store: &S, title: &str) -> Result<Test, QuizError> {
    let mut editor = TestEditor::new();
    editor.set_title(title);
    let test = editor.finish()?;
    store.update(|data| data.upsert_test(test.clone()))?;
    info!(test = %test.id, title, "created test");
    Ok(test)
}

pub fn list_tests<S: DocumentStore>(store: &S) -> Result<Vec<TestSummary>, QuizError> {
    let data = store.fetch()?;
    Ok(data
        .tests
        .iter()
        .map(|t| TestSummary {
            id: t.id.clone(),
            title: t.title.clone(),
            questions: t.questions.len(),
        })
        .collect())
}

pub fn find_test<S: DocumentStore>(store: &S, test_id: &str) -> Result<Test, QuizError> {
    store
        .fetch()?
        .find_test(test_id)
        .cloned()
        .ok_or_else(|| QuizError::TestNotFound(test_id.to_string()))
}

/// Delete a test. Results already recorded for it are kept.
pub fn delete_test<S: DocumentStore>(store: &S, test_id: &str) -> Result<Test, QuizError> {
    let removed = store
        .update(|data| data.remove_test(test_id))?
        .ok_or_else(|| QuizError::TestNotFound(test_id.to_string()))?;
    info!(test = %removed.id, title = %removed.title, "deleted test");
    Ok(removed)
}

/// Open a test in the editor, run `edit` and save the result.
fn edit_test<S, T>(
    store: &S,
    test_id: &str,
    edit: impl FnOnce(&mut TestEditor) -> Result<T, QuizError>,
) -> Result<T, QuizError>
where
    S: DocumentStore,
{
    let mut data = store.fetch()?;
    let test = data
        .find_test(test_id)
        .cloned()
        .ok_or_else(|| QuizError::TestNotFound(test_id.to_string()))?;

    let mut editor = TestEditor::open(test);
    let out = edit(&mut editor)?;
    data.upsert_test(editor.finish()?);
    store.replace(&data)?;
    Ok(out)
}

/// Import pasted questions into a test. Returns how many were added.
pub fn import_into<S: DocumentStore>(
    store: &S,
    test_id: &str,
    raw: &str,
) -> Result<usize, QuizError> {
    edit_test(store, test_id, |editor| Ok(editor.import_text(raw)))
}

/// Apply an answer key to a test. Returns how many answers were set.
pub fn apply_keys_to<S: DocumentStore>(
    store: &S,
    test_id: &str,
    keys: &str,
) -> Result<usize, QuizError> {
    edit_test(store, test_id, |editor| Ok(editor.apply_keys(keys)))
}

/// Replace the options of question `number` (1-based) with a pasted list.
pub fn paste_options_into<S: DocumentStore>(
    store: &S,
    test_id: &str,
    number: usize,
    raw: &str,
) -> Result<usize, QuizError> {
    edit_test(store, test_id, |editor| {
        let idx = number.checked_sub(1).ok_or(EditError::QuestionOutOfRange {
            number,
            total: editor.questions().len(),
        })?;
        Ok(editor.paste_options(idx, raw)?)
    })
}

/// Parse a student's answers: one entry per question, separated by commas
/// or whitespace, each a 1-based option number or an answer letter.
pub fn parse_answers(raw: &str) -> Result<Vec<usize>, QuizError> {
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|token| {
            let invalid = || QuizError::InvalidAnswer(token.to_string());
            if let Ok(number) = token.parse::<usize>() {
                return number.checked_sub(1).ok_or_else(invalid);
            }
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => letter_index(letter).ok_or_else(invalid),
                _ => Err(invalid()),
            }
        })
        .collect()
}

/// Grade a full set of answers and store the result with the student's progress.
pub fn grade<S: DocumentStore>(
    store: &S,
    test_id: &str,
    student: &Student,
    answers: &[usize],
) -> Result<Graded, QuizError> {
    let mut data = store.fetch()?;
    let test = data
        .find_test(test_id)
        .ok_or_else(|| QuizError::TestNotFound(test_id.to_string()))?;

    let mut attempt = Attempt::new(test);
    for (question, &option) in answers.iter().enumerate() {
        attempt.select(question, option)?;
    }
    debug!(
        test = %test_id,
        answered = attempt.answered_count(),
        total = test.questions.len(),
        "submitting attempt"
    );
    let result = attempt.submit(student)?;
    let review = attempt.review();

    data.record_result(result.clone());
    store.replace(&data)?;
    info!(test = %test_id, user = %student.id, score = result.score, "recorded result");
    Ok(Graded { result, review })
}

/// Results newest first, optionally narrowed to those whose student name
/// or test title contains `search` (case-insensitive).
pub fn list_results<S: DocumentStore>(
    store: &S,
    search: Option<&str>,
) -> Result<Vec<TestResult>, QuizError> {
    let data = store.fetch()?;
    let results = match search {
        Some(term) => data.search_results(term),
        None => data.results_by_date(),
    };
    Ok(results.into_iter().cloned().collect())
}

/// Mark a lecture as viewed by a student.
pub fn view_lecture<S: DocumentStore>(
    store: &S,
    user_id: &str,
    lecture_id: &str,
) -> Result<(), QuizError> {
    let mut data = store.fetch()?;
    if !data.lectures.iter().any(|l| l.id == lecture_id) {
        return Err(QuizError::LectureNotFound(lecture_id.to_string()));
    }
    data.mark_lecture_viewed(user_id, lecture_id);
    store.replace(&data)?;
    info!(user = %user_id, lecture = %lecture_id, "lecture viewed");
    Ok(())
}

/// Viewed lectures, passed tests and the best score on every test.
pub fn student_progress<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<StudentProgress, QuizError> {
    let data = store.fetch()?;
    let progress = data.progress(user_id).cloned().unwrap_or_default();
    let scores = data
        .tests
        .iter()
        .map(|t| TestScore {
            test_id: t.id.clone(),
            title: t.title.clone(),
            best: data.best_score(user_id, &t.id),
        })
        .collect();
    Ok(StudentProgress {
        viewed_lectures: progress.viewed_lectures,
        passed_tests: progress.passed_tests,
        scores,
    })
}

/// Plain-text view of a test; the correct option is starred.
pub fn render_test(test: &Test) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", test.title, test.id);
    for (i, question) in test.questions.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, question.text);
        if let Some(image) = &question.image {
            let preview: String = image.chars().take(40).collect();
            let _ = writeln!(out, "   [image: {preview}]");
        }
        for (j, option) in question.options.iter().enumerate() {
            let mark = if question.is_correct(j) { '*' } else { ' ' };
            let _ = writeln!(out, " {mark} {}) {option}", j + 1);
        }
    }
    out
}
