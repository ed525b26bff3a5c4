//! Live in-process roster owned by the host.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashSet;
use tracing::debug;

use crate::error::SourceError;

use super::source::PlayerSource;
use super::types::PlayerList;

/// Concurrent set of connected player names.
///
/// Clones share the same underlying set, so the host keeps one handle to
/// record joins and leaves while the status endpoint holds another.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    inner: Arc<DashSet<String>>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster pre-populated with names.
    pub fn with_players<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roster = Self::new();
        for name in names {
            roster.connect(name.as_ref());
        }
        roster
    }

    /// Record a player joining. Returns false if the name was already
    /// present or is blank.
    pub fn connect(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let added = self.inner.insert(name.to_string());
        if added {
            debug!(player = name, online = self.inner.len(), "player connected");
        }
        added
    }

    /// Record a player leaving. Returns false if the name was not present.
    pub fn disconnect(&self, name: &str) -> bool {
        let removed = self.inner.remove(name.trim()).is_some();
        if removed {
            debug!(player = name.trim(), online = self.inner.len(), "player disconnected");
        }
        removed
    }

    /// Whether the named player is connected.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains(name.trim())
    }

    /// Number of connected players.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every entry, e.g. when the host loses its upstream servers.
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Synchronous snapshot of the roster.
    pub fn snapshot(&self) -> PlayerList {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[async_trait]
impl PlayerSource for Roster {
    fn name(&self) -> &'static str {
        "roster"
    }

    async fn players(&self) -> Result<PlayerList, SourceError> {
        Ok(self.snapshot())
    }
}
