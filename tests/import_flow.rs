use std::fs;
use std::path::PathBuf;

use quiz_author::commands;
use quiz_author::{DocumentStore, JsonFileStore, QuizError, Student};

const PASTED: &str = "\
1. Сколько будет 2+2?
Три
Четыре
Пять

Вопрос 2: Столица Франции?
а) Лондон
б) Париж
в) Берлин

3) Самая длинная река?
- Нил
- Амазонка
- Волга
";

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("quiz-author-flow-{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn test_import_keys_grade() {
    let path = temp_path();
    let store = JsonFileStore::new(&path);

    let test = commands::create_test(&store, "Общие знания").unwrap();
    assert_eq!(commands::import_into(&store, &test.id, PASTED).unwrap(), 3);
    assert_eq!(
        commands::apply_keys_to(&store, &test.id, "1-Б, 2-Б; 3 - А, 4-А").unwrap(),
        3
    );

    let saved = commands::find_test(&store, &test.id).unwrap();
    let prompts: Vec<_> = saved.questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(
        prompts,
        vec!["Сколько будет 2+2?", "Столица Франции?", "Самая длинная река?"]
    );
    let correct: Vec<_> = saved.questions.iter().map(|q| q.correct_option()).collect();
    assert_eq!(correct, vec![Some("Четыре"), Some("Париж"), Some("Нил")]);

    let student = Student {
        id: "u42".to_string(),
        name: "Маша".to_string(),
    };
    let answers = commands::parse_answers("2, б, 2").unwrap();
    let graded = commands::grade(&store, &test.id, &student, &answers).unwrap();
    assert_eq!(graded.result.score, 67);
    assert_eq!(graded.review.iter().filter(|r| r.is_correct).count(), 2);

    let data = store.fetch().unwrap();
    assert_eq!(data.results.len(), 1);
    assert_eq!(data.progress_map["u42"].passed_tests, vec![test.id.clone()]);

    store.reset_stats().unwrap();
    let data = store.fetch().unwrap();
    assert!(data.results.is_empty());
    assert!(data.progress_map["u42"].passed_tests.is_empty());
    assert_eq!(data.tests.len(), 1);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_incomplete_attempt_is_not_recorded() {
    let path = temp_path();
    let store = JsonFileStore::new(&path);

    let test = commands::create_test(&store, "Короткий").unwrap();
    commands::import_into(&store, &test.id, "Q1\nA\nB\n\nQ2\nC\nD").unwrap();
    let student = Student {
        id: "u1".to_string(),
        name: "Петя".to_string(),
    };
    let err = commands::grade(&store, &test.id, &student, &[0]).unwrap_err();
    assert!(matches!(err, QuizError::Grade(_)));
    assert!(store.fetch().unwrap().results.is_empty());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_paste_options_resets_answer() {
    let path = temp_path();
    let store = JsonFileStore::new(&path);

    let test = commands::create_test(&store, "Опции").unwrap();
    commands::import_into(&store, &test.id, "Q\nA\n+B").unwrap();
    let count = commands::paste_options_into(&store, &test.id, 1, "1. x\n2. y\n3. z").unwrap();
    assert_eq!(count, 3);

    let saved = commands::find_test(&store, &test.id).unwrap();
    assert_eq!(saved.questions[0].options, vec!["x", "y", "z"]);
    assert_eq!(saved.questions[0].correct_index, 0);

    fs::remove_file(&path).unwrap();
}
