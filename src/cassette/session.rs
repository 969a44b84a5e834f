//! Recording session: one cassette recorder per port.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::error::{Error, Result};

/// Per-port recorders writing into a timestamped directory.
pub struct RecordingSession {
    /// Recorder for source-control interactions.
    pub source: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<base>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the directory already exists or cannot
    /// be created.
    pub fn new(base: impl Into<PathBuf>, repository: &str) -> Result<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.into().join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Cassette(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| Error::Cassette(format!("failed to create cassette directory: {e}")))?;

        let make_recorder = |port: &str| {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(
                path,
                format!("{timestamp}-{port}"),
                repository,
            )))
        };

        Ok(Self { source: make_recorder("source"), llm: make_recorder("llm"), output_dir })
    }

    /// Directory holding the session's cassette files.
    #[must_use]
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Writes every port's cassette and returns the session directory.
    ///
    /// Recording adapters must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if a recorder is still shared or a file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        fn finish_one(recorder: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<()> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| Error::Cassette(format!("recording adapter for {port} still alive")))?
                .into_inner()
                .map_err(|e| Error::Cassette(format!("recorder lock for {port} poisoned: {e}")))?;
            recorder.finish()?;
            Ok(())
        }

        finish_one(self.source, "source")?;
        finish_one(self.llm, "llm")?;
        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_one_file_per_port() {
        let base = std::env::temp_dir().join("sahayatri_session_test");
        let _ = std::fs::remove_dir_all(&base);

        let session = RecordingSession::new(&base, "o/r").unwrap();
        session.source.lock().unwrap().record("source", "default_branch", json!({}), json!("x"));

        let dir = session.finish().unwrap();
        assert!(dir.join("source.cassette.yaml").exists());
        assert!(dir.join("llm.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn finish_fails_while_a_recorder_is_shared() {
        let base = std::env::temp_dir().join("sahayatri_session_shared_test");
        let _ = std::fs::remove_dir_all(&base);

        let session = RecordingSession::new(&base, "o/r").unwrap();
        let _held = Arc::clone(&session.llm);
        assert!(matches!(session.finish(), Err(Error::Cassette(_))));

        let _ = std::fs::remove_dir_all(&base);
    }
}
