mod document;
mod question;

pub use document::{Block, BlockKind, Lecture, Progress, Role, SchoolData, TestResult, User};
pub use question::{Question, Test};
