//! Upstream HTTP player source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::SourceError;

use super::source::PlayerSource;
use super::types::PlayerList;

/// Player list bodies accepted from the upstream.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamPlayers {
    /// `["alice", "bob"]`
    List(Vec<String>),
    /// `{"players": ["alice", "bob"]}`
    Wrapped { players: Vec<String> },
}

/// Fetches the player list from an upstream endpoint on every call.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    /// HTTP client for upstream requests.
    http: reqwest::Client,
    /// Upstream URL.
    url: String,
}

impl RemoteSource {
    /// Create a source for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Upstream URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<PlayerList, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "upstream rejected player list request");
            return Err(SourceError::Upstream {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let list = decode_players(&body)?;
        debug!(count = list.len(), "fetched upstream player list");
        Ok(list)
    }
}

/// Decode an upstream body into a player list.
pub fn decode_players(body: &[u8]) -> Result<PlayerList, SourceError> {
    let parsed: UpstreamPlayers =
        serde_json::from_slice(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    let names = match parsed {
        UpstreamPlayers::List(names) => names,
        UpstreamPlayers::Wrapped { players } => players,
    };
    Ok(PlayerList::new(names))
}

#[async_trait]
impl PlayerSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn players(&self) -> Result<PlayerList, SourceError> {
        self.fetch().await
    }
}
