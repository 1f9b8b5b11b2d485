//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - publishers(id, name)
//! - shops(id, name)
//! - books(id, title, id_publisher)
//! - stocks(id, id_book, id_shop, count)
//! - sales(id, price, date_sale, count, id_stock)

pub mod schema;
pub mod sqlite;

pub use sqlite::{BookstockStore, StoreStats};
