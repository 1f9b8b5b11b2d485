pub mod output;
pub mod table;
pub mod theme;

pub use output::{dim, error, header, info, section, success};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
