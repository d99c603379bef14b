//! # scopewise-server
//!
//! JSON HTTP API over the Scopewise crates:
//!
//! - estimates, PDF reports and share templates for a requirements record
//! - calculator submissions, contact inquiries and partner applications
//! - the partner directory with match scoring
//! - admin endpoints for reviewing submissions and applications, guarded by
//!   a bearer token
//!
//! ## Tech Stack
//!
//! - Axum for HTTP, with `tower-http` request tracing
//! - Any [`scopewise_gateway::PersistenceGateway`] as storage

pub mod api_types;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ServerError;
pub use routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
