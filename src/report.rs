//! Lookup reports over the loaded store
//!
//! Two independent, stateless lookups:
//! - publisher lookup: one input token, matched by primary key when the
//!   token is all digits, otherwise as a `LIKE` pattern against the name
//! - sales-window lookup: publishers whose books sold inside an inclusive
//!   timestamp window

use crate::model::Publisher;
use crate::storage::BookstockStore;
use crate::Result;

/// Default sales-window bounds, used when neither CLI nor config supply one.
pub const DEFAULT_WINDOW_START: &str = "2018-10-24";
pub const DEFAULT_WINDOW_END: &str = "2018-10-26";

/// How a publisher-lookup token is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherQuery {
    /// Exact primary-key match
    ById(i64),
    /// Case-sensitive `LIKE` match against the name (`%`/`_` wildcards live)
    ByPattern(String),
}

impl PublisherQuery {
    /// Classify a raw input token.
    ///
    /// A non-empty all-ASCII-digit token is an id; everything else is a
    /// name pattern. A digit string too large for i64 falls through to the
    /// pattern branch rather than failing.
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = token.parse::<i64>() {
                return PublisherQuery::ById(id);
            }
        }
        PublisherQuery::ByPattern(token.to_string())
    }
}

/// Run the publisher lookup for a raw input token.
pub fn lookup_publishers(store: &BookstockStore, token: &str) -> Result<Vec<Publisher>> {
    match PublisherQuery::classify(token) {
        PublisherQuery::ById(id) => {
            tracing::debug!("publisher lookup by id {}", id);
            Ok(store.publisher_by_id(id)?.into_iter().collect())
        }
        PublisherQuery::ByPattern(pattern) => {
            tracing::debug!("publisher lookup by pattern {:?}", pattern);
            store.publishers_by_name_pattern(&pattern)
        }
    }
}

/// Publishers with at least one sale inside the inclusive `[lo, hi]` window.
pub fn sales_window(store: &BookstockStore, lo: &str, hi: &str) -> Result<Vec<Publisher>> {
    tracing::debug!("sales window {:?} .. {:?}", lo, hi);
    store.publishers_with_sales_between(lo, hi)
}

/// Format a result row as the report prints it.
pub fn format_row(publisher: &Publisher) -> String {
    format!("{} {}", publisher.id, publisher.name)
}

/// Print result rows, one `<id> <name>` line each.
pub fn print_rows(publishers: &[Publisher]) {
    for publisher in publishers {
        println!("{}", format_row(publisher));
    }
}
