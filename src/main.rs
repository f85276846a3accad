use std::path::Path;
use std::process;

use csv_duckdb::ingest_file;
use tracing_subscriber::{fmt, EnvFilter};

const SOURCE_PATH: &str = "inventory.csv";
const DATABASE_PATH: &str = "inventory_converted.db";
const TABLE_NAME: &str = "inventory";

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    match ingest_file(
        Path::new(SOURCE_PATH),
        Path::new(DATABASE_PATH),
        TABLE_NAME,
    ) {
        Ok(summary) => println!(
            "Conversion complete: {} created ({} rows, {} columns).",
            DATABASE_PATH, summary.rows, summary.columns
        ),
        Err(e) => {
            eprintln!("conversion failed: {}", e);
            process::exit(1);
        }
    }
}
