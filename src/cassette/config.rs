//! Per-port cassette configuration.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::{Error, Result};

/// Cassette file per port. A port without a file panics when called
/// during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the source-control port.
    pub source: Option<PathBuf>,
    /// Cassette for the LLM port.
    pub llm: Option<PathBuf>,
}

/// Loaded replayers, one per configured port.
pub struct PortReplayers {
    /// Replayer for the source-control port.
    pub source: Option<CassetteReplayer>,
    /// Replayer for the LLM port.
    pub llm: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Uses one cassette file for every port.
    #[must_use]
    pub fn monolithic(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self { source: Some(path.clone()), llm: Some(path) }
    }

    /// Per-port files as written by a recording session into `dir`.
    #[must_use]
    pub fn session_dir(dir: &Path) -> Self {
        Self {
            source: Some(dir.join("source.cassette.yaml")),
            llm: Some(dir.join("llm.cassette.yaml")),
        }
    }

    /// Reads and parses one cassette file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Cassette(format!("failed to read {}: {e}", path.display())))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| Error::Cassette(format!("{}: {e}", path.display())))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if any configured file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers> {
        Ok(PortReplayers {
            source: self.source.as_deref().map(Self::load_cassette).transpose()?,
            llm: self.llm.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}
