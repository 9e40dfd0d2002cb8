// Runtime configuration, read from the environment.
//
// | Variable        | Default | Description                                  |
// |-----------------|---------|----------------------------------------------|
// | `RESUME_OUTPUT` | unset   | Also write each submission as JSON to a file |
//
// Logging is configured separately through `RUST_LOG` (see `main.rs`).

use std::path::{Path, PathBuf};

use crate::sink::{JsonFileSink, LogSink, Tee};

pub const OUTPUT_VAR: &str = "RESUME_OUTPUT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Where to write submissions, if anywhere.
    pub output: Option<PathBuf>,
}

impl Config {
    /// Build a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output = lookup(OUTPUT_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(|v| expand_home(&v));
        Config { output }
    }

    /// Sinks for this config: always the log, plus the JSON file when set.
    pub fn sinks(&self) -> Tee {
        let tee = Tee::new().with(LogSink);
        match &self.output {
            Some(path) => tee.with(JsonFileSink::new(path)),
            None => tee,
        }
    }
}

/// Expand a leading `~/` against the home directory. Falls back to the
/// current directory when no home is known.
fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => Path::new(raw).to_path_buf(),
    }
}
