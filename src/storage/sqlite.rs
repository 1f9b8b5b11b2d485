//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::model::{Book, ModelKind, Publisher, Sale, Shop, Stock};
use super::schema;

/// SQLite-backed store for the bookstore schema
pub struct BookstockStore {
    conn: Connection,
}

impl BookstockStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.configure()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.configure()?;
        Ok(store)
    }

    /// Connection-level pragmas. Foreign keys are off by default in SQLite,
    /// and LIKE is ASCII-case-insensitive by default; the schema and the
    /// publisher lookup both depend on the opposite.
    fn configure(&self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", true)?;
        self.conn.pragma_update(None, "case_sensitive_like", true)?;
        Ok(())
    }

    /// Drop all five tables (if present) and create them fresh.
    ///
    /// Destructive: every run starts from an empty schema. Data never
    /// persists across invocations.
    pub fn recreate_schema(&self) -> Result<()> {
        for stmt in schema::drop_statements() {
            self.conn.execute(stmt, [])?;
        }
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Inserts ==========
    //
    // Each insert is its own implicit transaction: one fixture record,
    // one commit. A constraint violation aborts the caller's load.

    /// Insert a publisher with an explicit primary key
    pub fn insert_publisher(&self, publisher: &Publisher) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO publishers (id, name) VALUES (?1, ?2)",
                params![publisher.id, publisher.name],
            )
            .map_err(|e| insert_err("publishers", e))?;
        Ok(())
    }

    /// Insert a shop with an explicit primary key
    pub fn insert_shop(&self, shop: &Shop) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO shops (id, name) VALUES (?1, ?2)",
                params![shop.id, shop.name],
            )
            .map_err(|e| insert_err("shops", e))?;
        Ok(())
    }

    /// Insert a book; the referenced publisher must already exist
    pub fn insert_book(&self, book: &Book) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO books (id, title, id_publisher) VALUES (?1, ?2, ?3)",
                params![book.id, book.title, book.id_publisher],
            )
            .map_err(|e| insert_err("books", e))?;
        Ok(())
    }

    /// Insert a stock line; the referenced book and shop must already exist
    pub fn insert_stock(&self, stock: &Stock) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO stocks (id, id_book, id_shop, count) VALUES (?1, ?2, ?3, ?4)",
                params![stock.id, stock.id_book, stock.id_shop, stock.count],
            )
            .map_err(|e| insert_err("stocks", e))?;
        Ok(())
    }

    /// Insert a sale; the referenced stock line must already exist
    pub fn insert_sale(&self, sale: &Sale) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO sales (id, price, date_sale, count, id_stock) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![sale.id, sale.price, sale.date_sale, sale.count, sale.id_stock],
            )
            .map_err(|e| insert_err("sales", e))?;
        Ok(())
    }

    // ========== Lookups ==========

    /// Get a publisher by primary key
    pub fn publisher_by_id(&self, id: i64) -> Result<Option<Publisher>> {
        self.conn
            .query_row(
                "SELECT id, name FROM publishers WHERE id = ?1",
                [id],
                row_to_publisher,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find publishers whose name matches a LIKE pattern.
    ///
    /// The pattern is passed through unescaped, so `%` and `_` are live
    /// wildcards. Matching is case-sensitive (see [`Self::configure`]).
    pub fn publishers_by_name_pattern(&self, pattern: &str) -> Result<Vec<Publisher>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM publishers WHERE name LIKE ?1")?;

        let publishers = stmt
            .query_map([pattern], row_to_publisher)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(publishers)
    }

    /// Publishers that had at least one sale with `date_sale` in the
    /// inclusive `[lo, hi]` window. Joins sales -> stocks -> books ->
    /// publishers; each publisher appears once, ordered by id.
    pub fn publishers_with_sales_between(&self, lo: &str, hi: &str) -> Result<Vec<Publisher>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT DISTINCT p.id, p.name
            FROM publishers p
            JOIN books b ON b.id_publisher = p.id
            JOIN stocks st ON st.id_book = b.id
            JOIN sales s ON s.id_stock = st.id
            WHERE s.date_sale BETWEEN ?1 AND ?2
            ORDER BY p.id
            "#,
        )?;

        let publishers = stmt
            .query_map([lo, hi], row_to_publisher)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(publishers)
    }

    /// Count rows in the table backing a model kind
    pub fn count_rows(&self, kind: ModelKind) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Row counts for all five tables
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            publishers: self.count_rows(ModelKind::Publisher)?,
            shops: self.count_rows(ModelKind::Shop)?,
            books: self.count_rows(ModelKind::Book)?,
            stocks: self.count_rows(ModelKind::Stock)?,
            sales: self.count_rows(ModelKind::Sale)?,
        })
    }
}

fn row_to_publisher(row: &rusqlite::Row<'_>) -> rusqlite::Result<Publisher> {
    Ok(Publisher {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Classify an insert failure: constraint violations get their own variant
/// so the fixture loader can report which table rejected the record.
fn insert_err(table: &'static str, err: rusqlite::Error) -> Error {
    if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
        return Error::Constraint { table, source: err };
    }
    Error::Storage(err)
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub publishers: usize,
    pub shops: usize,
    pub books: usize,
    pub stocks: usize,
    pub sales: usize,
}

impl StoreStats {
    pub fn total(&self) -> usize {
        self.publishers + self.shops + self.books + self.stocks + self.sales
    }
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Publishers: {}", self.publishers)?;
        writeln!(f, "  Shops: {}", self.shops)?;
        writeln!(f, "  Books: {}", self.books)?;
        writeln!(f, "  Stocks: {}", self.stocks)?;
        writeln!(f, "  Sales: {}", self.sales)
    }
}
