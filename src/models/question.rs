use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: usize,
}

impl Question {
    /// Create a question with a fresh id.
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            image: None,
            options,
            correct_index,
        }
    }

    /// A blank question as the editor creates it: empty prompt, two empty options.
    pub fn blank() -> Self {
        Self::new(String::new(), vec![String::new(), String::new()], 0)
    }

    /// Replace the whole option list. Correctness resets to the first option.
    pub fn replace_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.correct_index = 0;
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Test {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            questions: Vec::new(),
        }
    }

    /// Append imported questions after the existing ones.
    pub fn append(&mut self, questions: Vec<Question>) -> usize {
        let count = questions.len();
        self.questions.extend(questions);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serialization_uses_camel_case() {
        let q = Question::new("2+2?", vec!["3".into(), "4".into()], 1);
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"correctIndex\":1"));
        assert!(!json.contains("image"));
    }

    #[test]
    fn test_question_deserializes_stored_shape() {
        let json = r#"{"id":"17","text":"Q","image":"data:image/png;base64,AA","options":["a","b"],"correctIndex":1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "17");
        assert_eq!(q.image.as_deref(), Some("data:image/png;base64,AA"));
        assert_eq!(q.correct_option(), Some("b"));
    }

    #[test]
    fn test_replace_options_resets_correct_index() {
        let mut q = Question::new("Q", vec!["a".into(), "b".into(), "c".into()], 2);
        q.replace_options(vec!["x".into(), "y".into()]);
        assert_eq!(q.options, vec!["x", "y"]);
        assert_eq!(q.correct_index, 0);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Question::blank();
        let b = Question::blank();
        assert_ne!(a.id, b.id);
        assert_eq!(a.options.len(), 2);
    }

    #[test]
    fn test_append_keeps_existing_order() {
        let mut test = Test::new("T");
        test.append(vec![Question::new("one", vec![], 0)]);
        let added = test.append(vec![
            Question::new("two", vec![], 0),
            Question::new("three", vec![], 0),
        ]);
        assert_eq!(added, 2);
        let texts: Vec<_> = test.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
