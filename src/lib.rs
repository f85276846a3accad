//! Converts a delimited text file into a table in a DuckDB database file.

pub mod dataset;
pub mod duckdb_load;
pub mod error;
pub mod file_load;

use std::path::Path;

use tracing::info;

pub use crate::error::IngestError;

/// Outcome of a successful ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows: usize,
    pub columns: usize,
}

/// Load the source file and write it into the database, replacing any
/// existing table of the same name.
///
/// The loader runs to completion before the database file is opened, so
/// a load failure never touches the destination.
pub fn ingest_file(
    source: &Path,
    db_path: &Path,
    table: &str,
) -> Result<IngestSummary, IngestError> {
    let dataset = file_load::load_csv(source)?;
    let columns = dataset.columns.len();

    let mut sink = duckdb_load::DuckdbSink::open(db_path, table)?;
    let rows = sink.replace_table(&dataset)?;
    info!(
        "wrote {} rows into table '{}' in '{}'",
        rows,
        table,
        db_path.display()
    );

    Ok(IngestSummary { rows, columns })
}
