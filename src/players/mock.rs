//! Mock player source for unit testing.
//!
//! This module provides a stub collaborator that returns a fixed list
//! without any host attached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::SourceError;

use super::source::PlayerSource;
use super::types::PlayerList;

/// Configuration for mock source behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail every snapshot request.
    pub fail: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock player source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockPlayerSource {
    /// Mock configuration.
    config: MockConfig,
    /// Names returned by the next snapshot.
    players: Arc<Mutex<Vec<String>>>,
    /// Number of snapshot requests served.
    calls: Arc<AtomicUsize>,
}

impl MockPlayerSource {
    /// Create a mock returning the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config: MockConfig::default(),
            players: Arc::new(Mutex::new(names.into_iter().map(Into::into).collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock with custom configuration and no players.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a mock whose snapshots always fail.
    pub fn failing() -> Self {
        Self::with_config(MockConfig {
            fail: true,
            latency_ms: 0,
        })
    }

    /// Replace the names returned by later snapshots.
    pub fn set_players<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.players.lock().unwrap() = names.into_iter().map(Into::into).collect();
    }

    /// Number of snapshot requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn snapshot(&self) -> Result<PlayerList, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail {
            return Err(SourceError::Unavailable("mock source failure".to_string()));
        }

        let names = self.players.lock().unwrap().clone();
        Ok(PlayerList::new(names))
    }
}

#[async_trait]
impl PlayerSource for MockPlayerSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn players(&self) -> Result<PlayerList, SourceError> {
        self.snapshot().await
    }
}
