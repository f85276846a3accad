use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::IngestError;

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const SNIFF_LINES: usize = 5;

/// Read a delimited text file fully into memory and parse it into a
/// [`Dataset`]. The first record is the header row.
pub fn load_csv(path: &Path) -> Result<Dataset, IngestError> {
    let content = fs::read_to_string(path).map_err(|e| read_error(path, e))?;

    let delimiter = detect_delimiter(&content);
    debug!("using delimiter {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = header_names(reader.headers().map_err(record_error)?)?;

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(record_error)?;
        records.push(record.iter().map(str::to_string).collect());
    }
    info!(
        "loaded {} data rows from '{}'",
        records.len(),
        path.display()
    );

    Dataset::from_records(headers, records)
}

// Detect the delimiter by inspecting the first few non-empty lines: a
// candidate counts only if it appears the same non-zero number of times
// on every sampled line. Falls back to comma.
fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    if sample.is_empty() {
        return b',';
    }

    let mut best = (b',', 0usize);
    for candidate in DELIMITER_CANDIDATES {
        let count = count_delimiter(sample[0], candidate);
        if count <= best.1 {
            continue;
        }
        if sample
            .iter()
            .all(|line| count_delimiter(line, candidate) == count)
        {
            best = (candidate, count);
        }
    }
    best.0
}

fn count_delimiter(line: &str, delimiter: u8) -> usize {
    line.bytes().filter(|&b| b == delimiter).count()
}

// Trim header cells, reject empty ones, and de-duplicate repeated names
// with a numeric suffix so the dataset's column names stay unique
fn header_names(raw: &csv::StringRecord) -> Result<Vec<String>, IngestError> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, cell) in raw.iter().enumerate() {
        let name = cell.trim();
        if name.is_empty() {
            return Err(IngestError::Parse {
                line: 1,
                message: format!("header column {} is empty", idx + 1),
            });
        }
        names.push(name.to_string());
    }

    if names.is_empty() {
        return Err(IngestError::Parse {
            line: 1,
            message: "input file has no header row".to_string(),
        });
    }

    Ok(dedupe_names(names))
}

fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 0usize;
        while out.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}_{}", name, suffix);
        }
        if suffix > 0 {
            debug!("renamed duplicate header `{}` to `{}`", name, candidate);
        }
        out.push(candidate);
    }
    out
}

fn record_error(err: csv::Error) -> IngestError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    IngestError::Parse {
        line,
        message: err.to_string(),
    }
}

fn read_error(path: &Path, err: io::Error) -> IngestError {
    if err.kind() == io::ErrorKind::NotFound {
        IngestError::FileNotFound(path.to_path_buf())
    } else {
        IngestError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
