use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quiz_author::commands::{self, parse_answers, render_test};
use quiz_author::grading::is_good_result;
use quiz_author::{logging, Config, DocumentStore, JsonFileStore, Student};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding the school data (overrides QUIZ_DATA_FILE)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty test
    NewTest {
        #[arg(short, long)]
        title: String,
    },
    /// List all tests
    List,
    /// Delete a test; its recorded results stay
    DeleteTest {
        #[arg(short, long)]
        test: String,
    },
    /// Print a test with its correct answers marked
    Show {
        #[arg(short, long)]
        test: String,
    },
    /// Import questions from pasted text (blank line between questions)
    Import {
        #[arg(short, long)]
        test: String,
        /// Text file to read, stdin if omitted or `-`
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Apply an answer key such as "1-А, 2-Б, 3-В"
    Keys {
        #[arg(short, long)]
        test: String,
        keys: String,
    },
    /// Replace one question's options with a pasted list
    PasteOptions {
        #[arg(short, long)]
        test: String,
        /// Question number, starting at 1
        #[arg(short, long)]
        question: usize,
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Grade a student's answers and record the result
    Grade {
        #[arg(short, long)]
        test: String,
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        name: String,
        /// One answer per question: option numbers or letters, e.g. "2,1,3" or "б,а,в"
        #[arg(short, long)]
        answers: String,
    },
    /// Show recorded results, newest first
    Results {
        /// Only results whose student name or test title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Mark a lecture as viewed by a student
    ViewLecture {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        lecture: String,
    },
    /// Show a student's viewed lectures, passed tests and best scores
    Progress {
        #[arg(short, long)]
        user: String,
    },
    /// Delete all results and passed-test marks
    ResetStats,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(data) = args.data {
        config.data_file = data;
    }
    logging::init(&config.log_filter);

    let store = JsonFileStore::new(&config.data_file);

    match args.command {
        Command::NewTest { title } => {
            let test = commands::create_test(&store, &title)?;
            println!("Created test {}", test.id);
        }
        Command::List => {
            for summary in commands::list_tests(&store)? {
                println!("{}  {} ({} questions)", summary.id, summary.title, summary.questions);
            }
        }
        Command::DeleteTest { test } => {
            let removed = commands::delete_test(&store, &test)?;
            println!("Deleted test {} ({})", removed.id, removed.title);
        }
        Command::Show { test } => {
            let test = commands::find_test(&store, &test)?;
            print!("{}", render_test(&test));
        }
        Command::Import { test, file } => {
            let raw = read_input(file.as_ref())?;
            let imported = commands::import_into(&store, &test, &raw)?;
            println!("Imported {} questions", imported);
        }
        Command::Keys { test, keys } => {
            let applied = commands::apply_keys_to(&store, &test, &keys)?;
            println!("Updated {} answers", applied);
        }
        Command::PasteOptions { test, question, file } => {
            let raw = read_input(file.as_ref())?;
            let count = commands::paste_options_into(&store, &test, question, &raw)?;
            println!("Question {} now has {} options", question, count);
        }
        Command::Grade {
            test,
            user,
            name,
            answers,
        } => {
            let answers = parse_answers(&answers)?;
            let student = Student { id: user, name };
            let graded = commands::grade(&store, &test, &student, &answers)?;
            for line in &graded.review {
                let mark = if line.is_correct { "ok" } else { "wrong" };
                println!(
                    "{:>3}. answered {}, correct {}  {}",
                    line.question_index + 1,
                    line.your_answer + 1,
                    line.correct_answer + 1,
                    mark
                );
            }
            let result = graded.result;
            let verdict = if is_good_result(result.score, config.pass_mark) {
                "good result"
            } else {
                "worth revising the material"
            };
            println!("{}: {}% ({})", result.user_name, result.score, verdict);
        }
        Command::Results { search } => {
            for result in commands::list_results(&store, search.as_deref())? {
                println!(
                    "{}  {:<20} {:<30} {:>3}%",
                    result.date, result.user_name, result.test_title, result.score
                );
            }
        }
        Command::ViewLecture { user, lecture } => {
            commands::view_lecture(&store, &user, &lecture)?;
            println!("Lecture {} marked as viewed for {}", lecture, user);
        }
        Command::Progress { user } => {
            let progress = commands::student_progress(&store, &user)?;
            println!(
                "Viewed {} lectures, passed {} tests",
                progress.viewed_lectures.len(),
                progress.passed_tests.len()
            );
            for score in &progress.scores {
                match score.best {
                    Some(best) => println!("{:<30} best {:>3}%", score.title, best),
                    None => println!("{:<30} not taken", score.title),
                }
            }
        }
        Command::ResetStats => {
            store.reset_stats()?;
            println!("Statistics reset");
        }
    }

    Ok(())
}
