//! CSV Loader
//!
//! Reads the transaction file once at startup. Rows keep their raw string
//! values. Every row is aligned to the header: missing trailing fields read
//! as empty strings, extra fields are dropped. Invalid UTF-8 is replaced
//! rather than rejected.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use super::record::{Dataset, RawRecord};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load a dataset from a CSV file on disk
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = read_csv(file)?;
    tracing::info!(
        "Loaded {} rows ({} columns) from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV from any reader (header row required)
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Arc<[String]> = rdr
        .byte_headers()?
        .iter()
        .map(lossy)
        .collect::<Vec<_>>()
        .into();

    let mut rows = Vec::new();
    let mut replaced = 0usize;
    for record in rdr.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            replaced += 1;
        }
        let mut values: Vec<String> = record.iter().map(lossy).collect();
        values.resize(columns.len(), String::new());
        rows.push(RawRecord::new(Arc::clone(&columns), values));
    }

    if replaced > 0 {
        tracing::warn!("{} rows contained invalid UTF-8, bad bytes were replaced", replaced);
    }

    Ok(Dataset::new(rows))
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
