// Submission sinks: where a validated resume goes.
// The form controller only knows the `SubmissionSink` trait; the binary
// picks the concrete sinks from `Config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::form::Resume;

/// Receives each successfully submitted resume.
pub trait SubmissionSink {
    fn submit(&mut self, resume: &Resume) -> Result<()>;
}

/// Logs the resume as JSON through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, resume: &Resume) -> Result<()> {
        let json = serde_json::to_string(resume).context("Serializing resume")?;
        tracing::info!(resume = %json, "Resume submitted");
        Ok(())
    }
}

/// Writes each submission as pretty JSON to a fixed path, replacing the
/// previous one.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionSink for JsonFileSink {
    fn submit(&mut self, resume: &Resume) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(resume).context("Serializing resume")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "Resume written");
        Ok(())
    }
}

/// In-memory capture.
impl SubmissionSink for Vec<Resume> {
    fn submit(&mut self, resume: &Resume) -> Result<()> {
        self.push(resume.clone());
        Ok(())
    }
}

/// Fans a submission out to every inner sink, stopping at the first error.
#[derive(Default)]
pub struct Tee {
    sinks: Vec<Box<dyn SubmissionSink>>,
}

impl Tee {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl SubmissionSink for Tee {
    fn submit(&mut self, resume: &Resume) -> Result<()> {
        for sink in &mut self.sinks {
            sink.submit(resume)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, PersonalField};

    fn sample() -> Resume {
        let mut form = FormState::new();
        form.set_personal(PersonalField::Name, "Ada");
        form.set_personal(PersonalField::Email, "ada@example.com");
        form.set_personal(PersonalField::Phone, "555");
        form.snapshot()
    }

    #[test]
    fn json_file_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("resume.json");
        let mut sink = JsonFileSink::new(&path);

        sink.submit(&sample()).unwrap();

        let written: Resume =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, sample());
    }

    #[test]
    fn log_sink_accepts_any_resume() {
        LogSink.submit(&Resume::default()).unwrap();
    }

    #[test]
    fn tee_reaches_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        let mut tee = Tee::new().with(LogSink).with(JsonFileSink::new(&path));
        assert_eq!(tee.len(), 2);

        tee.submit(&sample()).unwrap();
        assert!(path.exists());
    }
}
