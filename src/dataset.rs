use tracing::debug;

use crate::error::IngestError;

// Scalar types a column can be inferred as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    // The DuckDB type the column is created with
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "BIGINT",
            ColumnType::Float => "DOUBLE",
            ColumnType::Text => "VARCHAR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

// In-memory tabular dataset: named columns plus positionally aligned rows
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from header names and raw string records.
    ///
    /// Every record must have exactly as many fields as there are headers.
    /// Column types are inferred independently per column before the cells
    /// are converted.
    pub fn from_records(
        names: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Result<Self, IngestError> {
        for (offset, record) in records.iter().enumerate() {
            if record.len() != names.len() {
                return Err(IngestError::Parse {
                    line: offset as u64 + 2,
                    message: format!(
                        "expected {} fields, found {}",
                        names.len(),
                        record.len()
                    ),
                });
            }
        }

        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let ty = infer_column_type(&name, idx, &records);
                Column { name, ty }
            })
            .collect();

        let mut rows = Vec::with_capacity(records.len());
        for (offset, record) in records.into_iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for (column, cell) in columns.iter().zip(record) {
                row.push(convert_cell(cell, column, offset as u64 + 2)?);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }
}

// For each column, look at every cell:
//  - Ignore empty cells, they load as NULL
//  - All remaining cells parse as i64 -> Integer
//  - All remaining cells parse as f64 -> Float
//  - Anything else -> Text
//  - No non-empty cells at all -> Text
fn infer_column_type(name: &str, idx: usize, records: &[Vec<String>]) -> ColumnType {
    let mut saw_value = false;
    let mut all_integers = true;
    let mut all_floats = true;

    for record in records {
        let cell = &record[idx];
        if cell.is_empty() {
            continue;
        }
        saw_value = true;

        let bytes = cell.trim().as_bytes();
        if all_integers && lexical_core::parse::<i64>(bytes).is_err() {
            all_integers = false;
        }
        if lexical_core::parse::<f64>(bytes).is_err() {
            debug!("column `{}` is not numeric, falling back to text", name);
            all_floats = false;
            break;
        }
    }

    if !saw_value {
        debug!("column `{}` has no values, defaulting to text", name);
        return ColumnType::Text;
    }

    if all_integers {
        ColumnType::Integer
    } else if all_floats {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn convert_cell(cell: String, column: &Column, line: u64) -> Result<Value, IngestError> {
    if cell.is_empty() {
        return Ok(Value::Null);
    }

    match column.ty {
        ColumnType::Integer => lexical_core::parse::<i64>(cell.trim().as_bytes())
            .map(Value::Integer)
            .map_err(|_| conversion_error(&cell, &column.name, "an integer", line)),
        ColumnType::Float => lexical_core::parse::<f64>(cell.trim().as_bytes())
            .map(Value::Float)
            .map_err(|_| conversion_error(&cell, &column.name, "a number", line)),
        ColumnType::Text => Ok(Value::Text(cell)),
    }
}

fn conversion_error(cell: &str, column: &str, expected: &str, line: u64) -> IngestError {
    IngestError::Parse {
        line,
        message: format!("column `{}`: `{}` is not {}", column, cell, expected),
    }
}
