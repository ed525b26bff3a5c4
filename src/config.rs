//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;
use strum::Display;

use crate::error::StatusError;

/// Port the status endpoint listens on unless overridden.
pub const DEFAULT_STATUS_PORT: u16 = 5050;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Interface the status endpoint binds to.
    #[serde(default = "default_host")]
    pub status_host: String,

    /// Port the status endpoint binds to.
    #[serde(default = "default_port")]
    pub status_port: u16,

    // === Player Source ===
    /// Roster file re-read on every request (one name per line).
    #[serde(default)]
    pub players_file: Option<PathBuf>,

    /// Upstream URL returning the player list as JSON.
    #[serde(default)]
    pub players_url: Option<String>,

    /// Timeout for upstream player list requests, in milliseconds.
    #[serde(default = "default_players_timeout_ms")]
    pub players_timeout_ms: u64,

    // === Observability ===
    /// Port for the Prometheus exporter. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Which player source the configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SourceKind {
    /// In-process roster fed by the host.
    #[strum(serialize = "roster")]
    Roster,
    /// Roster file on disk.
    #[strum(serialize = "file")]
    File,
    /// Upstream HTTP endpoint.
    #[strum(serialize = "remote")]
    Remote,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_STATUS_PORT
}

fn default_players_timeout_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_host: default_host(),
            status_port: default_port(),
            players_file: None,
            players_url: None,
            players_timeout_ms: default_players_timeout_ms(),
            metrics_port: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.status_host.parse::<IpAddr>().is_err() {
            return Err(format!(
                "STATUS_HOST must be an IP address, got {:?}",
                self.status_host
            ));
        }

        if self.players_file.is_some() && self.players_url.is_some() {
            return Err("PLAYERS_FILE and PLAYERS_URL are mutually exclusive".to_string());
        }

        if let Some(raw) = &self.players_url {
            let url = url::Url::parse(raw).map_err(|e| format!("PLAYERS_URL is invalid: {}", e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err("PLAYERS_URL must use http or https".to_string());
            }
        }

        if self.players_timeout_ms == 0 {
            return Err("PLAYERS_TIMEOUT_MS must be greater than 0".to_string());
        }

        if let Some(metrics_port) = self.metrics_port {
            if metrics_port != 0 && metrics_port == self.status_port {
                return Err("METRICS_PORT must differ from STATUS_PORT".to_string());
            }
        }

        Ok(())
    }

    /// Socket address the status endpoint binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, StatusError> {
        let ip: IpAddr = self
            .status_host
            .parse()
            .map_err(|_| StatusError::InvalidConfig(format!("bad host {:?}", self.status_host)))?;
        Ok(SocketAddr::new(ip, self.status_port))
    }

    /// Log filter directives: verbose wins over `RUST_LOG`.
    pub fn log_filter(&self, cli_verbose: bool) -> String {
        if cli_verbose || self.verbose {
            "hyclone_status=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// The player source this configuration selects.
    pub fn source_kind(&self) -> SourceKind {
        if self.players_url.is_some() {
            SourceKind::Remote
        } else if self.players_file.is_some() {
            SourceKind::File
        } else {
            SourceKind::Roster
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.status_port, 5050);
        assert_eq!(config.status_host, "0.0.0.0");
        assert_eq!(config.source_kind(), SourceKind::Roster);
        assert!(config.validate().is_ok());
    }

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(vars.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = from_vars(&[]);

        assert_eq!(config.status_host, "0.0.0.0");
        assert_eq!(config.status_port, DEFAULT_STATUS_PORT);
        assert_eq!(config.players_timeout_ms, 2000);
        assert_eq!(config.metrics_port, None);
        assert_eq!(config.rust_log, "info");
        assert!(!config.verbose);
        assert_eq!(config.source_kind(), SourceKind::Roster);
    }

    #[test]
    fn environment_variables_populate_fields() {
        let config = from_vars(&[
            ("STATUS_HOST", "127.0.0.1"),
            ("STATUS_PORT", "6060"),
            ("PLAYERS_FILE", "/srv/hyclone/players.txt"),
            ("METRICS_PORT", "9100"),
            ("RUST_LOG", "warn"),
        ]);

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:6060");
        assert_eq!(
            config.players_file,
            Some(PathBuf::from("/srv/hyclone/players.txt"))
        );
        assert_eq!(config.metrics_port, Some(9100));
        assert_eq!(config.source_kind(), SourceKind::File);
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter(false), "warn");
    }

    #[test]
    fn environment_selects_remote_source() {
        let config = from_vars(&[
            ("PLAYERS_URL", "http://127.0.0.1:8000/players"),
            ("PLAYERS_TIMEOUT_MS", "500"),
        ]);

        assert_eq!(config.source_kind(), SourceKind::Remote);
        assert_eq!(config.players_timeout_ms, 500);
    }

    #[test]
    fn verbose_from_environment_raises_log_level() {
        let config = from_vars(&[("VERBOSE", "true"), ("RUST_LOG", "warn")]);

        assert!(config.verbose);
        assert_eq!(config.log_filter(false), "hyclone_status=debug,info");
        assert_eq!(Config::default().log_filter(true), "hyclone_status=debug,info");
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = Config {
            status_host: "127.0.0.1".to_string(),
            status_port: 6060,
            ..Config::default()
        };

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:6060");
    }

    #[test]
    fn validate_rejects_hostname() {
        let config = Config {
            status_host: "localhost".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn validate_rejects_both_sources() {
        let config = Config {
            players_file: Some(PathBuf::from("players.txt")),
            players_url: Some("http://127.0.0.1:8000/players".to_string()),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = Config {
            players_url: Some("ftp://example.com/players".to_string()),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_metrics_on_status_port() {
        let config = Config {
            metrics_port: Some(DEFAULT_STATUS_PORT),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn source_kind_prefers_remote_then_file() {
        let remote = Config {
            players_url: Some("http://127.0.0.1:8000/players".to_string()),
            ..Config::default()
        };
        let file = Config {
            players_file: Some(PathBuf::from("players.txt")),
            ..Config::default()
        };

        assert_eq!(remote.source_kind(), SourceKind::Remote);
        assert_eq!(file.source_kind(), SourceKind::File);
        assert_eq!(file.source_kind().to_string(), "file");
    }
}
