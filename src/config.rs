use std::path::PathBuf;

use crate::data::DEFAULT_DATA_PATH;
use crate::grading::DEFAULT_PASS_MARK;

/// Runtime settings, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON document holding lectures, tests, users and results
    pub data_file: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `quiz_author=debug`
    pub log_filter: String,
    /// Minimum percentage shown as a good result
    pub pass_mark: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_PATH),
            log_filter: "info".to_string(),
            pass_mark: DEFAULT_PASS_MARK,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_file: std::env::var("QUIZ_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(default.data_file),
            log_filter: std::env::var("QUIZ_LOG").unwrap_or(default.log_filter),
            pass_mark: std::env::var("QUIZ_PASS_MARK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.pass_mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("db.json"));
        assert_eq!(config.pass_mark, 70);
        assert_eq!(config.log_filter, "info");
    }
}
