//! Entity types for the bookstore schema
//!
//! Five related entities, all keyed by an explicit integer primary key:
//! - `Publisher`: has many books
//! - `Shop`: holds stock lines
//! - `Book`: belongs to a publisher
//! - `Stock`: copies of a book held at a shop
//! - `Sale`: a transaction against a stock line

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The five entity kinds a fixture record can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Publisher,
    Shop,
    Book,
    Stock,
    Sale,
}

impl ModelKind {
    /// Get the string representation of the model kind (the fixture tag)
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Publisher => "publisher",
            ModelKind::Shop => "shop",
            ModelKind::Book => "book",
            ModelKind::Stock => "stock",
            ModelKind::Sale => "sale",
        }
    }

    /// SQL table backing this entity kind
    pub fn table(&self) -> &'static str {
        match self {
            ModelKind::Publisher => "publishers",
            ModelKind::Shop => "shops",
            ModelKind::Book => "books",
            ModelKind::Stock => "stocks",
            ModelKind::Sale => "sales",
        }
    }

    /// All model kinds, in dependency order (parents before children)
    pub fn all() -> &'static [ModelKind] {
        &[
            ModelKind::Publisher,
            ModelKind::Shop,
            ModelKind::Book,
            ModelKind::Stock,
            ModelKind::Sale,
        ]
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "publisher" => Ok(ModelKind::Publisher),
            "shop" => Ok(ModelKind::Shop),
            "book" => Ok(ModelKind::Book),
            "stock" => Ok(ModelKind::Stock),
            "sale" => Ok(ModelKind::Sale),
            _ => Err(Error::UnknownModelKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A publishing house. Name is unique, at most 60 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

/// A bookshop. Name is unique, at most 60 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
}

/// A title in a publisher's catalogue. Title is unique, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub id_publisher: i64,
}

/// A stock line: how many copies of a book a shop holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub id_book: i64,
    pub id_shop: i64,
    pub count: Option<i64>,
}

/// A sale against a stock line. `date_sale` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub price: Option<f64>,
    pub date_sale: String,
    pub count: Option<i64>,
    pub id_stock: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_roundtrip() {
        for kind in ModelKind::all() {
            let parsed: ModelKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_unknown_model_kind() {
        let err = "author".parse::<ModelKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownModelKind(tag) if tag == "author"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Publisher".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_dependency_order() {
        let all = ModelKind::all();
        let pos = |k: ModelKind| all.iter().position(|x| *x == k).unwrap();
        assert!(pos(ModelKind::Publisher) < pos(ModelKind::Book));
        assert!(pos(ModelKind::Book) < pos(ModelKind::Stock));
        assert!(pos(ModelKind::Stock) < pos(ModelKind::Sale));
    }
}
