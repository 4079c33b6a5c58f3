//! Student test attempts and scoring.

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Test, TestResult};

/// Scores at or above this percentage count as a good result.
pub const DEFAULT_PASS_MARK: u32 = 70;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GradeError {
    #[error("test has no questions")]
    EmptyTest,

    #[error("unanswered questions: {}", format_numbers(.0))]
    Unanswered(Vec<usize>),

    #[error("question {question} has no option {option}")]
    AnswerOutOfRange { question: usize, option: usize },
}

fn format_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Who is taking the test.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub name: String,
}

/// Review line for one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub question_index: usize,
    pub your_answer: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
}

/// One student's pass through a test.
pub struct Attempt<'a> {
    test: &'a Test,
    answers: Vec<Option<usize>>,
}

impl<'a> Attempt<'a> {
    pub fn new(test: &'a Test) -> Self {
        Self {
            test,
            answers: vec![None; test.questions.len()],
        }
    }

    pub fn test(&self) -> &Test {
        self.test
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Choose an option. Choosing again overwrites the earlier choice.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), GradeError> {
        let out_of_range = GradeError::AnswerOutOfRange {
            question: question + 1,
            option: option + 1,
        };
        let q = self.test.questions.get(question).ok_or_else(|| out_of_range.clone())?;
        if option >= q.options.len() {
            return Err(out_of_range);
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// 1-based numbers of the questions still without an answer.
    pub fn unanswered(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(self.test.questions.iter())
            .filter(|(answer, question)| **answer == Some(question.correct_index))
            .count()
    }

    /// Rounded percentage of correct answers.
    pub fn score_percent(&self) -> u32 {
        let total = self.test.questions.len();
        if total == 0 {
            return 0;
        }
        (self.correct_count() as f64 * 100.0 / total as f64).round() as u32
    }

    pub fn review(&self) -> Vec<AnswerReview> {
        self.answers
            .iter()
            .zip(self.test.questions.iter())
            .enumerate()
            .filter_map(|(i, (answer, question))| {
                let your_answer = (*answer)?;
                Some(AnswerReview {
                    question_index: i,
                    your_answer,
                    correct_answer: question.correct_index,
                    is_correct: question.is_correct(your_answer),
                })
            })
            .collect()
    }

    /// Finish the attempt. Every question must be answered.
    pub fn submit(&self, student: &Student) -> Result<TestResult, GradeError> {
        if self.test.questions.is_empty() {
            return Err(GradeError::EmptyTest);
        }
        let missing = self.unanswered();
        if !missing.is_empty() {
            return Err(GradeError::Unanswered(missing));
        }

        Ok(TestResult {
            id: Uuid::new_v4().to_string(),
            user_id: student.id.clone(),
            user_name: student.name.clone(),
            test_id: self.test.id.clone(),
            test_title: self.test.title.clone(),
            score: self.score_percent(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

pub fn is_good_result(score: u32, pass_mark: u32) -> bool {
    score >= pass_mark
}
