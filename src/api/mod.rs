//! HTTP interface for the Hepascan application.
//!
//! This module contains all API-related functionality.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::configure;
