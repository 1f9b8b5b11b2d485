//! Fixture loading - seeding the store from a JSON document
//!
//! A fixture document is a JSON array of tagged records:
//!
//! ```json
//! [
//!   {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
//!   {"model": "book", "pk": 1, "fields": {"title": "T", "id_publisher": 1}}
//! ]
//! ```
//!
//! Records are loaded in document order, one commit per record. The first
//! failure aborts the remaining load; rows committed before it stay.

use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::model::{Book, ModelKind, Publisher, Sale, Shop, Stock};
use crate::storage::BookstockStore;
use crate::{Error, Result};

/// One record of a fixture document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub model: String,
    pub pk: i64,
    pub fields: Map<String, Value>,
}

/// Read a fixture document from disk and load it into the store.
/// Returns the number of records committed.
pub fn load_file(store: &BookstockStore, path: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<FixtureRecord> = serde_json::from_str(&contents)?;
    load_records(store, &records)
}

/// Load records in document order, committing each one individually.
pub fn load_records(store: &BookstockStore, records: &[FixtureRecord]) -> Result<usize> {
    for (loaded, record) in records.iter().enumerate() {
        load_record(store, record).inspect_err(|_| {
            tracing::error!(
                "fixture load aborted at record {} (model={}, pk={})",
                loaded,
                record.model,
                record.pk
            );
        })?;
        tracing::debug!("loaded {} pk={}", record.model, record.pk);
    }
    Ok(records.len())
}

/// Resolve the record's tag and insert the corresponding entity.
/// Tag resolution happens before any store mutation for the record.
fn load_record(store: &BookstockStore, record: &FixtureRecord) -> Result<()> {
    let kind = ModelKind::from_str(&record.model)?;
    let fields = FieldView::new(kind, record.pk, &record.fields);
    match kind {
        ModelKind::Publisher => store.insert_publisher(&Publisher {
            id: record.pk,
            name: fields.required_str("name")?,
        }),
        ModelKind::Shop => store.insert_shop(&Shop {
            id: record.pk,
            name: fields.required_str("name")?,
        }),
        ModelKind::Book => store.insert_book(&Book {
            id: record.pk,
            title: fields.required_str("title")?,
            id_publisher: fields.required_int("id_publisher")?,
        }),
        ModelKind::Stock => store.insert_stock(&Stock {
            id: record.pk,
            id_book: fields.required_int("id_book")?,
            id_shop: fields.required_int("id_shop")?,
            count: fields.optional_int("count")?,
        }),
        ModelKind::Sale => store.insert_sale(&Sale {
            id: record.pk,
            price: fields.optional_float("price")?,
            date_sale: fields.required_str("date_sale")?,
            count: fields.optional_int("count")?,
            id_stock: fields.required_int("id_stock")?,
        }),
    }
}

/// Typed access into a record's `fields` map, with error messages that
/// identify the offending record.
struct FieldView<'a> {
    kind: ModelKind,
    pk: i64,
    fields: &'a Map<String, Value>,
}

impl<'a> FieldView<'a> {
    fn new(kind: ModelKind, pk: i64, fields: &'a Map<String, Value>) -> Self {
        Self { kind, pk, fields }
    }

    fn bad_field(&self, key: &str, problem: &str) -> Error {
        Error::Fixture(format!(
            "{} pk={}: field `{}` {}",
            self.kind, self.pk, key, problem
        ))
    }

    fn required_str(&self, key: &str) -> Result<String> {
        match self.fields.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.bad_field(key, "is not a string")),
            None => Err(self.bad_field(key, "is missing")),
        }
    }

    fn required_int(&self, key: &str) -> Result<i64> {
        match self.fields.get(key) {
            Some(value) => value
                .as_i64()
                .ok_or_else(|| self.bad_field(key, "is not an integer")),
            None => Err(self.bad_field(key, "is missing")),
        }
    }

    fn optional_int(&self, key: &str) -> Result<Option<i64>> {
        match self.fields.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.bad_field(key, "is not an integer")),
        }
    }

    fn optional_float(&self, key: &str) -> Result<Option<f64>> {
        match self.fields.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.bad_field(key, "is not a number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fresh_store() -> BookstockStore {
        let store = BookstockStore::open_in_memory().unwrap();
        store.recreate_schema().unwrap();
        store
    }

    fn parse(doc: &str) -> Vec<FixtureRecord> {
        serde_json::from_str(doc).unwrap()
    }

    const FULL_DOC: &str = r#"[
        {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
        {"model": "publisher", "pk": 2, "fields": {"name": "Globex"}},
        {"model": "shop", "pk": 1, "fields": {"name": "Main St"}},
        {"model": "book", "pk": 1, "fields": {"title": "T1", "id_publisher": 1}},
        {"model": "book", "pk": 2, "fields": {"title": "T2", "id_publisher": 2}},
        {"model": "stock", "pk": 1, "fields": {"id_book": 1, "id_shop": 1, "count": 10}},
        {"model": "sale", "pk": 1, "fields": {"price": 600.0, "date_sale": "2018-10-25 09:00:00", "count": 1, "id_stock": 1}}
    ]"#;

    #[test]
    fn test_counts_match_tags() {
        let store = fresh_store();
        let loaded = load_records(&store, &parse(FULL_DOC)).unwrap();
        assert_eq!(loaded, 7);

        assert_eq!(store.count_rows(ModelKind::Publisher).unwrap(), 2);
        assert_eq!(store.count_rows(ModelKind::Shop).unwrap(), 1);
        assert_eq!(store.count_rows(ModelKind::Book).unwrap(), 2);
        assert_eq!(store.count_rows(ModelKind::Stock).unwrap(), 1);
        assert_eq!(store.count_rows(ModelKind::Sale).unwrap(), 1);
    }

    #[test]
    fn test_unknown_tag_aborts_before_mutation() {
        let store = fresh_store();
        let doc = r#"[
            {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
            {"model": "author", "pk": 1, "fields": {"name": "X"}},
            {"model": "publisher", "pk": 2, "fields": {"name": "Globex"}}
        ]"#;

        let err = load_records(&store, &parse(doc)).unwrap_err();
        assert!(matches!(err, Error::UnknownModelKind(tag) if tag == "author"));

        // the record before the bad one is committed, nothing after it is
        assert_eq!(store.count_rows(ModelKind::Publisher).unwrap(), 1);
    }

    #[test]
    fn test_dangling_fk_aborts_remaining_load() {
        let store = fresh_store();
        let doc = r#"[
            {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
            {"model": "book", "pk": 1, "fields": {"title": "T", "id_publisher": 42}},
            {"model": "publisher", "pk": 2, "fields": {"name": "Globex"}}
        ]"#;

        let err = load_records(&store, &parse(doc)).unwrap_err();
        assert!(matches!(err, Error::Constraint { table: "books", .. }));

        assert_eq!(store.count_rows(ModelKind::Publisher).unwrap(), 1);
        assert_eq!(store.count_rows(ModelKind::Book).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_unique_name_is_constraint_error() {
        let store = fresh_store();
        let doc = r#"[
            {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
            {"model": "publisher", "pk": 2, "fields": {"name": "Acme"}}
        ]"#;

        let err = load_records(&store, &parse(doc)).unwrap_err();
        assert!(matches!(err, Error::Constraint { table: "publishers", .. }));
    }

    #[test]
    fn test_missing_field() {
        let store = fresh_store();
        let doc = r#"[{"model": "publisher", "pk": 1, "fields": {}}]"#;

        let err = load_records(&store, &parse(doc)).unwrap_err();
        assert!(matches!(err, Error::Fixture(msg) if msg.contains("`name` is missing")));
    }

    #[test]
    fn test_missing_date_sale_is_fixture_error() {
        let store = fresh_store();
        let doc = r#"[
            {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
            {"model": "shop", "pk": 1, "fields": {"name": "Main St"}},
            {"model": "book", "pk": 1, "fields": {"title": "T", "id_publisher": 1}},
            {"model": "stock", "pk": 1, "fields": {"id_book": 1, "id_shop": 1, "count": 1}},
            {"model": "sale", "pk": 1, "fields": {"price": 1.0, "count": 1, "id_stock": 1}}
        ]"#;

        let err = load_records(&store, &parse(doc)).unwrap_err();
        assert!(matches!(err, Error::Fixture(msg) if msg.contains("`date_sale`")));
    }

    #[test]
    fn test_load_file_roundtrip() {
        let store = fresh_store();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_DOC.as_bytes()).unwrap();

        let loaded = load_file(&store, file.path()).unwrap();
        assert_eq!(loaded, 7);
        assert_eq!(store.stats().unwrap().total(), 7);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = fresh_store();
        let err = load_file(&store, Path::new("no_such_fixture.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
