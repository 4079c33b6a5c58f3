//! # quiz-author
//!
//! Authoring and grading core of a small online school: turn pasted text
//! into multiple-choice questions, backfill answer keys, grade student
//! attempts, and keep it all in one JSON document.
//!
//! ## Usage
//!
//! ```rust
//! use quiz_author::{Test, TestEditor};
//!
//! let mut editor = TestEditor::open(Test::new("Арифметика"));
//! let imported = editor.import_text("1. Сколько будет 2+2?\nТри\n+Четыре\nПять");
//! assert_eq!(imported, 1);
//!
//! let applied = editor.apply_keys("1-В");
//! assert_eq!(applied, 1);
//! assert_eq!(editor.questions()[0].correct_option(), Some("Пять"));
//! ```

pub mod commands;
pub mod config;
pub mod data;
pub mod editor;
pub mod grading;
pub mod import;
pub mod logging;
mod models;

use std::io;

use thiserror::Error;

pub use config::Config;
pub use data::{DocumentStore, JsonFileStore, StoreError};
pub use editor::{EditError, TestEditor};
pub use grading::{Attempt, GradeError, Student};
pub use models::{
    Block, BlockKind, Lecture, Progress, Question, Role, SchoolData, Test, TestResult, User,
};

/// Error type for store-backed operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Reading or writing the school document failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An editor action was rejected.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// The attempt could not be graded.
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error("no test with id {0}")]
    TestNotFound(String),
    #[error("no lecture with id {0}")]
    LectureNotFound(String),
    #[error("not an answer: {0:?}")]
    InvalidAnswer(String),
    /// IO error while reading pasted input.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
