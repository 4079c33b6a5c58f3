//! Test editing session.
//!
//! Wraps a [`Test`] and exposes the actions of the authoring page: manual
//! question and option edits plus the three text importers.

use thiserror::Error;
use tracing::info;

use crate::import;
use crate::models::{Question, Test};

/// A question needs at least this many options to stay answerable.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("question {number} does not exist (test has {total})")]
    QuestionOutOfRange { number: usize, total: usize },

    #[error("question {question} has no option {option}")]
    OptionOutOfRange { question: usize, option: usize },

    #[error("question {question} must keep at least {} options", MIN_OPTIONS)]
    TooFewOptions { question: usize },

    #[error("test title is required")]
    MissingTitle,
}

pub struct TestEditor {
    test: Test,
}

impl TestEditor {
    /// Start editing a fresh, untitled test.
    pub fn new() -> Self {
        Self::open(Test::new(String::new()))
    }

    /// Continue editing an existing test.
    pub fn open(test: Test) -> Self {
        Self { test }
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn questions(&self) -> &[Question] {
        &self.test.questions
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.test.title = title.into();
    }

    fn question_mut(&mut self, idx: usize) -> Result<&mut Question, EditError> {
        let total = self.test.questions.len();
        self.test
            .questions
            .get_mut(idx)
            .ok_or(EditError::QuestionOutOfRange {
                number: idx + 1,
                total,
            })
    }

    /// Append a blank question and return its index.
    pub fn add_question(&mut self) -> usize {
        self.test.questions.push(Question::blank());
        self.test.questions.len() - 1
    }

    pub fn remove_question(&mut self, idx: usize) -> Result<Question, EditError> {
        self.question_mut(idx)?;
        Ok(self.test.questions.remove(idx))
    }

    pub fn set_text(&mut self, idx: usize, text: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(idx)?.text = text.into();
        Ok(())
    }

    /// Attach an image (data URI or URL) to a question.
    pub fn set_image(&mut self, idx: usize, image: impl Into<String>) -> Result<(), EditError> {
        self.question_mut(idx)?.image = Some(image.into());
        Ok(())
    }

    pub fn clear_image(&mut self, idx: usize) -> Result<(), EditError> {
        self.question_mut(idx)?.image = None;
        Ok(())
    }

    pub fn add_option(&mut self, idx: usize) -> Result<usize, EditError> {
        let question = self.question_mut(idx)?;
        question.options.push(String::new());
        Ok(question.options.len() - 1)
    }

    pub fn update_option(
        &mut self,
        idx: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let question = self.question_mut(idx)?;
        let slot = question
            .options
            .get_mut(option)
            .ok_or(EditError::OptionOutOfRange {
                question: idx + 1,
                option: option + 1,
            })?;
        *slot = text.into();
        Ok(())
    }

    /// Remove an option, keeping the correct answer pointing at the same
    /// text. Removing the correct option itself resets it to the first one.
    pub fn remove_option(&mut self, idx: usize, option: usize) -> Result<String, EditError> {
        let question = self.question_mut(idx)?;
        if option >= question.options.len() {
            return Err(EditError::OptionOutOfRange {
                question: idx + 1,
                option: option + 1,
            });
        }
        if question.options.len() <= MIN_OPTIONS {
            return Err(EditError::TooFewOptions { question: idx + 1 });
        }

        let removed = question.options.remove(option);
        if question.correct_index == option {
            question.correct_index = 0;
        } else if question.correct_index > option {
            question.correct_index -= 1;
        }
        Ok(removed)
    }

    pub fn set_correct(&mut self, idx: usize, option: usize) -> Result<(), EditError> {
        let question = self.question_mut(idx)?;
        if option >= question.options.len() {
            return Err(EditError::OptionOutOfRange {
                question: idx + 1,
                option: option + 1,
            });
        }
        question.correct_index = option;
        Ok(())
    }

    /// Parse pasted text and append the questions. Returns how many were added.
    pub fn import_text(&mut self, raw: &str) -> usize {
        let imported = self.test.append(import::import_questions(raw));
        info!(test = %self.test.id, imported, "imported questions");
        imported
    }

    /// Apply an answer key. Returns how many answers changed hands.
    pub fn apply_keys(&mut self, key_text: &str) -> usize {
        let applied = import::apply_keys(key_text, &mut self.test.questions);
        info!(test = %self.test.id, applied, "applied answer keys");
        applied
    }

    /// Replace one question's options with a pasted list.
    pub fn paste_options(&mut self, idx: usize, raw: &str) -> Result<usize, EditError> {
        let question = self.question_mut(idx)?;
        question.replace_options(import::paste_options(raw));
        Ok(question.options.len())
    }

    /// Hand back the test for saving. A title is required.
    pub fn finish(self) -> Result<Test, EditError> {
        if self.test.title.trim().is_empty() {
            return Err(EditError::MissingTitle);
        }
        Ok(self.test)
    }
}

impl Default for TestEditor {
    fn default() -> Self {
        Self::new()
    }
}
