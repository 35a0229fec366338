//! # tokenward-database
//!
//! PostgreSQL connection management, migrations, and the repositories behind
//! the durable token store and the user directory.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
