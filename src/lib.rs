//! Player list status endpoint for the Hyclone multiserver proxy.
//!
//! The proxy host owns the list of connected players. This crate exposes
//! it over HTTP: every request, whatever its method or path, is answered
//! with the current list rendered as plain text.
//!
//! ```text
//! $ curl http://127.0.0.1:5050/
//! [alice bob]
//! ```
//!
//! The list is read through an injected [`players::PlayerSource`], so the
//! endpoint can sit on top of the host's live [`players::Roster`], a roster
//! file, an upstream HTTP endpoint, or a stub in tests.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`players`]: Player list snapshots and sources
//! - [`api`]: HTTP handler and router
//! - [`server`]: Listener binding and serve loop
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod players;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, StatusError};
pub use players::{PlayerList, PlayerSource, Roster};
pub use server::StatusServer;
