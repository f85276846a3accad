use std::path::Path;

use duckdb::types::ToSqlOutput;
use duckdb::{appender_params_from_iter, Connection, ToSql};
use tracing::info;

use crate::dataset::{Dataset, Value};
use crate::error::IngestError;

/// Writes datasets into a file-backed DuckDB database. The connection is
/// owned by the sink and released when it goes out of scope.
pub struct DuckdbSink {
    conn: Connection,
    table: String,
}

impl DuckdbSink {
    /// Open the database file at `db_path`, creating it if absent.
    pub fn open(db_path: &Path, table: &str) -> Result<Self, IngestError> {
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Drop any existing table of the same name and recreate it from the
    /// dataset, all inside one transaction.
    pub fn replace_table(&mut self, data: &Dataset) -> Result<usize, IngestError> {
        let table = quote_ident(&self.table);
        let columns = data
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.ty.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))?;
        tx.execute_batch(&format!("CREATE TABLE {} ({});", table, columns))?;
        {
            let mut appender = tx.appender(&self.table)?;
            for row in &data.rows {
                appender.append_row(appender_params_from_iter(row.iter()))?;
            }
            appender.flush()?;
        }
        tx.commit()?;

        info!(
            "table {} replaced with {} rows, {} columns",
            self.table,
            data.rows.len(),
            data.columns.len()
        );
        Ok(data.rows.len())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(duckdb::types::Value::Null),
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Float(v) => ToSqlOutput::from(*v),
            Value::Text(v) => ToSqlOutput::from(v.as_str()),
        })
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
