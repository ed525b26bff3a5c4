//! HTTP API module for the player list endpoint.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
