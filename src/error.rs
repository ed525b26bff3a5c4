//! Unified error types for the status endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the status endpoint.
#[derive(Error, Debug)]
pub enum StatusError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The listener could not be bound (usually: port already in use).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The serve loop terminated with an IO error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Player source error.
    #[error("player source error: {0}")]
    Source(#[from] SourceError),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(String),
}

/// Errors raised while taking a player list snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Roster file could not be read.
    #[error("failed to read roster file {path}: {source}")]
    Read {
        /// Roster file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// HTTP request to the upstream failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream {url} returned {status}")]
    Upstream {
        /// Upstream URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Upstream body was not a player list.
    #[error("failed to decode player list: {0}")]
    Decode(String),

    /// Source is temporarily unable to produce a snapshot.
    #[error("player list unavailable: {0}")]
    Unavailable(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, StatusError>;
