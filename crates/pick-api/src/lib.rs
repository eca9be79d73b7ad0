//! # pick-api
//!
//! HTTP API layer for the fresh-pick billing service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Request validation in front of the pricing engine
//! - Permissive CORS for browser frontends
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/test` | Liveness check |
//! | POST | `/billing/price` | Price a list of items |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
