//! Text importers used while authoring a test.
//!
//! All of them are total: malformed input produces fewer questions or
//! fewer applied keys, never an error.

mod bulk;
mod keys;
mod markers;
mod options;

pub use bulk::import_questions;
pub use keys::{apply_keys, letter_index, parse_fragment, AnswerKey};
pub use markers::{clean_option, clean_prompt, split_marked_option};
pub use options::paste_options;
