// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Integrity check on open

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, get_connection, get_database_path, ConnectionPool, PooledConn,
};

#[cfg(test)]
pub use connection::{create_test_connection, create_test_pool};

pub use migrations::{initialize_database, verify_database_integrity};
