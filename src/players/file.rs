//! Roster file player source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::SourceError;

use super::source::PlayerSource;
use super::types::PlayerList;

/// Reads the player list from a text file on every call.
///
/// One name per line; blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source backed by the given roster file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Roster file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read(&self) -> Result<PlayerList, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let list = parse_roster(&raw);
        debug!(count = list.len(), "read roster file");
        Ok(list)
    }
}

/// Parse roster file contents into a player list.
pub fn parse_roster(raw: &str) -> PlayerList {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

#[async_trait]
impl PlayerSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn players(&self) -> Result<PlayerList, SourceError> {
        self.read().await
    }
}
