//! Bookstock CLI - load the bookstore schema and run lookup reports

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use bookstock::config::{self, BookstockConfig};
use bookstock::report;
use bookstock::storage::BookstockStore;
use bookstock::{fixtures, ui};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookstock")]
#[command(version)]
#[command(about = "Bookstore stock and sales database - fixture loading and lookup reports")]
#[command(long_about = r#"
Bookstock recreates a five-table bookstore schema, seeds it from a JSON
fixture file, and answers two lookups:
  - publishers by id (all-digit token) or LIKE name pattern
  - publishers whose books sold inside a date window

Example usage:
  bookstock run --fixtures tests_data.json
  bookstock lookup "Acme%"
  bookstock sales --from 2018-10-24 --to 2018-10-26
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: bookstock.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pass: recreate schema, load fixtures, run both lookups
    Run {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the fixture file
        #[arg(short, long)]
        fixtures: Option<PathBuf>,

        /// Publisher token (id or name pattern); prompts on stdin if absent
        #[arg(short, long)]
        publisher: Option<String>,

        /// Sales window start (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Sales window end (inclusive)
        #[arg(long)]
        to: Option<String>,
    },

    /// Drop and recreate all tables
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Recreate the schema and load a fixture file
    Load {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Path to the fixture file
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },

    /// Look up publishers by id or LIKE name pattern
    Lookup {
        /// Id (all digits) or name pattern (% and _ are wildcards)
        token: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Publishers whose books sold inside a date window
    Sales {
        /// Window start (inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Window end (inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show row counts per table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Run { database, fixtures: fixtures_path, publisher, from, to } => {
            let db_path = resolve_database(database, &config);
            let fixtures_path = resolve_fixtures(fixtures_path, &config);
            let (lo, hi) = resolve_window(from, to, &config);

            let store = open_store(&db_path)?;
            store.recreate_schema()?;
            tracing::info!("schema recreated in {}", db_path.display());

            let loaded = fixtures::load_file(&store, &fixtures_path)?;
            tracing::info!("loaded {} fixture records from {}", loaded, fixtures_path.display());

            let token = match publisher {
                Some(token) => token,
                None => prompt("Input name or id publisher ")?,
            };

            ui::section("Publisher lookup");
            let rows = report::lookup_publishers(&store, &token)?;
            if rows.is_empty() {
                println!("{}", ui::dim("no matches"));
            } else {
                report::print_rows(&rows);
            }

            ui::section("Publishers with sales in window");
            println!("{}", ui::dim(&format!("{} .. {}", lo, hi)));
            let rows = report::sales_window(&store, &lo, &hi)?;
            if rows.is_empty() {
                println!("{}", ui::dim("no matches"));
            } else {
                report::print_rows(&rows);
            }
        }

        Commands::Init { database } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path)?;
            store.recreate_schema()?;
            ui::success(&format!("schema recreated in {}", db_path.display()));
        }

        Commands::Load { database, fixtures: fixtures_path } => {
            let db_path = resolve_database(database, &config);
            let fixtures_path = resolve_fixtures(fixtures_path, &config);

            let store = open_store(&db_path)?;
            store.recreate_schema()?;
            let loaded = fixtures::load_file(&store, &fixtures_path)?;
            ui::success(&format!(
                "loaded {} fixture records from {}",
                loaded,
                fixtures_path.display()
            ));
        }

        Commands::Lookup { token, database } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path)?;

            let rows = report::lookup_publishers(&store, &token)?;
            report::print_rows(&rows);
        }

        Commands::Sales { from, to, database } => {
            let db_path = resolve_database(database, &config);
            let (lo, hi) = resolve_window(from, to, &config);
            let store = open_store(&db_path)?;

            let rows = report::sales_window(&store, &lo, &hi)?;
            report::print_rows(&rows);
        }

        Commands::Stats { database } => {
            let db_path = resolve_database(database, &config);
            let store = open_store(&db_path)?;
            let stats = store.stats()?;

            ui::header(&format!("Bookstock ({})", db_path.display()));
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}

fn open_store(db_path: &Path) -> anyhow::Result<BookstockStore> {
    config::ensure_db_dir(db_path)?;
    Ok(BookstockStore::open(db_path)?)
}

fn resolve_database(flag: Option<PathBuf>, config: &BookstockConfig) -> PathBuf {
    flag.or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(config::default_database_path)
}

fn resolve_fixtures(flag: Option<PathBuf>, config: &BookstockConfig) -> PathBuf {
    flag.or_else(|| config.fixtures.as_ref().map(PathBuf::from))
        .unwrap_or_else(config::default_fixtures_path)
}

fn resolve_window(
    from: Option<String>,
    to: Option<String>,
    config: &BookstockConfig,
) -> (String, String) {
    let lo = from
        .or_else(|| config.sale_window_start.clone())
        .unwrap_or_else(|| report::DEFAULT_WINDOW_START.to_string());
    let hi = to
        .or_else(|| config.sale_window_end.clone())
        .unwrap_or_else(|| report::DEFAULT_WINDOW_END.to_string());
    (lo, hi)
}

fn prompt(message: &str) -> std::io::Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
