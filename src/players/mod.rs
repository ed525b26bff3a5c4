//! Player list module.
//!
//! This module handles:
//! - Player list snapshot types and their textual rendering
//! - The injectable [`PlayerSource`] capability
//! - Roster, file and upstream sources
//! - Mock source for testing

pub mod file;
pub mod mock;
pub mod remote;
pub mod roster;
pub mod source;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{Config, SourceKind};
use crate::error::SourceError;

pub use file::FileSource;
pub use mock::{MockConfig, MockPlayerSource};
pub use remote::RemoteSource;
pub use roster::Roster;
pub use source::PlayerSource;
pub use types::{OutputFormat, PlayerList, PlayerSnapshot};

/// Build the player source selected by `config`.
///
/// `seed` pre-populates the roster source and is ignored by the others.
pub fn source_from_config(
    config: &Config,
    seed: &[String],
) -> Result<Arc<dyn PlayerSource>, SourceError> {
    let source: Arc<dyn PlayerSource> = match config.source_kind() {
        SourceKind::Remote => {
            let url = config.players_url.clone().unwrap_or_default();
            let timeout = Duration::from_millis(config.players_timeout_ms);
            Arc::new(RemoteSource::new(url, timeout)?)
        }
        SourceKind::File => {
            let path = config.players_file.clone().unwrap_or_default();
            Arc::new(FileSource::new(path))
        }
        SourceKind::Roster => Arc::new(Roster::with_players(seed)),
    };

    info!(source = source.name(), "player source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn roster_source_is_seeded() {
        let config = Config::default();
        let seed = vec!["bob".to_string(), "alice".to_string()];

        let source = source_from_config(&config, &seed).unwrap();
        assert_eq!(source.name(), "roster");
        assert_eq!(source.players().await.unwrap().to_string(), "[alice bob]");
    }

    #[test]
    fn file_and_remote_sources_are_selected() {
        let file = Config {
            players_file: Some(PathBuf::from("players.txt")),
            ..Config::default()
        };
        let remote = Config {
            players_url: Some("http://127.0.0.1:9/players".to_string()),
            ..Config::default()
        };

        assert_eq!(source_from_config(&file, &[]).unwrap().name(), "file");
        assert_eq!(source_from_config(&remote, &[]).unwrap().name(), "remote");
    }
}
