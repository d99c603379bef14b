//! # scopewise-gateway
//!
//! Access to the hosted backend. The rest of Scopewise only depends on the
//! [`PersistenceGateway`] trait; two implementations are provided:
//!
//! - [`PostgresGateway`]: sqlx pool, jsonb rows
//! - [`MemoryGateway`]: in-process, with write-failure injection for tests

pub mod error;
pub mod gateway;
pub mod memory;
pub mod postgres;
pub mod table;

pub use error::GatewayError;
pub use gateway::PersistenceGateway;
pub use memory::MemoryGateway;
pub use postgres::PostgresGateway;
pub use table::{Direction, Order, OrderBy, Row, SelectQuery, Table, to_record};
