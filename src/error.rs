use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] duckdb::Error),
}
