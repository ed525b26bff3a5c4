//! The "get current players" capability the status endpoint depends on.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SourceError;

use super::types::PlayerList;

/// Anything that can produce a snapshot of the connected players.
///
/// The status handler calls [`PlayerSource::players`] exactly once per
/// request and never caches the result. Implementations decide their own
/// thread-safety; the handler only needs `Send + Sync`.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Take a snapshot of the current player list.
    async fn players(&self) -> Result<PlayerList, SourceError>;
}

#[async_trait]
impl<T: PlayerSource + ?Sized> PlayerSource for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn players(&self) -> Result<PlayerList, SourceError> {
        (**self).players().await
    }
}
