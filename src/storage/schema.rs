//! Database schema definitions

/// SQL to create the publishers table
pub const CREATE_PUBLISHERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS publishers (
    id INTEGER PRIMARY KEY,
    name VARCHAR(60) NOT NULL UNIQUE
)
"#;

/// SQL to create the shops table
pub const CREATE_SHOPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS shops (
    id INTEGER PRIMARY KEY,
    name VARCHAR(60) NOT NULL UNIQUE
)
"#;

/// SQL to create the books table
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title VARCHAR(100) NOT NULL UNIQUE,
    id_publisher INTEGER NOT NULL REFERENCES publishers(id)
)
"#;

/// SQL to create the stocks table
pub const CREATE_STOCKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stocks (
    id INTEGER PRIMARY KEY,
    id_book INTEGER NOT NULL REFERENCES books(id),
    id_shop INTEGER NOT NULL REFERENCES shops(id),
    count INTEGER
)
"#;

/// SQL to create the sales table
pub const CREATE_SALES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sales (
    id INTEGER PRIMARY KEY,
    price REAL,
    date_sale TEXT NOT NULL,
    count INTEGER,
    id_stock INTEGER NOT NULL REFERENCES stocks(id)
)
"#;

/// All table creation statements, parents before children
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_PUBLISHERS_TABLE,
        CREATE_SHOPS_TABLE,
        CREATE_BOOKS_TABLE,
        CREATE_STOCKS_TABLE,
        CREATE_SALES_TABLE,
    ]
}

/// Drop statements in reverse dependency order, so children go first
pub fn drop_statements() -> Vec<&'static str> {
    vec![
        "DROP TABLE IF EXISTS sales",
        "DROP TABLE IF EXISTS stocks",
        "DROP TABLE IF EXISTS books",
        "DROP TABLE IF EXISTS shops",
        "DROP TABLE IF EXISTS publishers",
    ]
}
