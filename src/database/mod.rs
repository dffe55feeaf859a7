//! Database Module
//!
//! Connection pooling and partition selection for PostgreSQL.

pub mod connection;
pub mod partition;

pub use connection::{DatabaseConfig, DatabasePool};
pub use partition::Partition;
