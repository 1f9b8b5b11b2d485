//! # Bookstock - bookstore stock and sales database
//!
//! A small data-loading and reporting tool over a relational schema of
//! publishers, shops, books, stock lines, and sales.
//!
//! Bookstock provides:
//! - A five-table SQLite schema with uniqueness and foreign-key constraints
//! - Destructive schema recreation before each load
//! - A JSON fixture loader with per-record commits
//! - Publisher lookup by id or `LIKE` pattern
//! - A sales-window report joining sales back to publishers

pub mod config;
pub mod fixtures;
pub mod model;
pub mod report;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use model::{Book, ModelKind, Publisher, Sale, Shop, Stock};
pub use report::PublisherQuery;
pub use storage::BookstockStore;

/// Result type alias for Bookstock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bookstock operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Constraint violation on {table}: {source}")]
    Constraint {
        table: &'static str,
        source: rusqlite::Error,
    },

    #[error("Unknown model kind: {0}")]
    UnknownModelKind(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
