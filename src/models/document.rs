//! The whole-school JSON document.
//!
//! The store hands this out and takes it back in one piece. Keys the
//! crate does not know about survive a fetch/replace cycle through
//! [`SchoolData::extra`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::question::Test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
    Video,
}

/// One block of lecture content. `content` is opaque (HTML, data URI or URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// A finished attempt, as shown on the admin statistics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub test_id: String,
    pub test_title: String,
    /// Percentage, 0..=100.
    pub score: u32,
    /// RFC 3339 timestamp.
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub viewed_lectures: Vec<String>,
    #[serde(default)]
    pub passed_tests: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolData {
    #[serde(default)]
    pub lectures: Vec<Lecture>,
    #[serde(default)]
    pub tests: Vec<Test>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub results: Vec<TestResult>,
    #[serde(default)]
    pub progress_map: BTreeMap<String, Progress>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchoolData {
    pub fn find_test(&self, test_id: &str) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == test_id)
    }

    pub fn find_test_mut(&mut self, test_id: &str) -> Option<&mut Test> {
        self.tests.iter_mut().find(|t| t.id == test_id)
    }

    /// Replace the test with the same id, or append it if it is new.
    pub fn upsert_test(&mut self, test: Test) {
        match self.find_test_mut(&test.id) {
            Some(existing) => *existing = test,
            None => self.tests.push(test),
        }
    }

    pub fn remove_test(&mut self, test_id: &str) -> Option<Test> {
        let pos = self.tests.iter().position(|t| t.id == test_id)?;
        Some(self.tests.remove(pos))
    }

    pub fn progress_mut(&mut self, user_id: &str) -> &mut Progress {
        self.progress_map.entry(user_id.to_string()).or_default()
    }

    /// Store a result and tick the test as passed for its user.
    pub fn record_result(&mut self, result: TestResult) {
        let progress = self.progress_mut(&result.user_id);
        if !progress.passed_tests.contains(&result.test_id) {
            progress.passed_tests.push(result.test_id.clone());
        }
        self.results.push(result);
    }

    pub fn mark_lecture_viewed(&mut self, user_id: &str, lecture_id: &str) {
        let progress = self.progress_mut(user_id);
        if !progress.viewed_lectures.iter().any(|l| l == lecture_id) {
            progress.viewed_lectures.push(lecture_id.to_string());
        }
    }

    /// Drop every result and every "passed" tick. Viewed lectures stay.
    pub fn reset_stats(&mut self) {
        self.results.clear();
        for progress in self.progress_map.values_mut() {
            progress.passed_tests.clear();
        }
    }

    /// Results newest first.
    pub fn results_by_date(&self) -> Vec<&TestResult> {
        let mut results: Vec<_> = self.results.iter().collect();
        results.sort_by(|a, b| b.date.cmp(&a.date));
        results
    }

    /// Results whose student name or test title contains `term`, ignoring
    /// case. Newest first, like [`SchoolData::results_by_date`].
    pub fn search_results(&self, term: &str) -> Vec<&TestResult> {
        let term = term.to_lowercase();
        self.results_by_date()
            .into_iter()
            .filter(|r| {
                r.user_name.to_lowercase().contains(&term)
                    || r.test_title.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn progress(&self, user_id: &str) -> Option<&Progress> {
        self.progress_map.get(user_id)
    }

    /// Highest score the user got on a test, if they ever took it.
    pub fn best_score(&self, user_id: &str, test_id: &str) -> Option<u32> {
        self.results
            .iter()
            .filter(|r| r.user_id == user_id && r.test_id == test_id)
            .map(|r| r.score)
            .max()
    }
}
