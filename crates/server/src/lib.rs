//! HTTP API server for the Berth NuGet repository.
//!
//! This crate provides the HTTP surface:
//! - Package push (`PUT /package`)
//! - Registration metadata (`GET /registrations/{id}/index.json`)
//! - Flat-container content (`GET /content/{*key}`)
//! - Health probe (`GET /health`)

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
