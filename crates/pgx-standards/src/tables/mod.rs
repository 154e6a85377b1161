//! Parsers for the four reference tables.
//!
//! The tables started life as spreadsheet exports, so cells may arrive as
//! strings, numbers or nulls. Every scalar is normalized to a trimmed string
//! before it reaches the model.

#![deny(unsafe_code)]

pub mod cyp2d6;
pub mod markers;
pub mod recommendations;

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::ReferenceError;

/// On-disk encoding of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Json,
    Csv,
}

impl TableKind {
    pub fn from_manifest(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "json" => Some(TableKind::Json),
            "csv" => Some(TableKind::Csv),
            _ => None,
        }
    }

    /// Infers the encoding from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_manifest)
    }
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, ReferenceError> {
    std::fs::read(path).map_err(|e| ReferenceError::io(path, e))
}

pub(crate) fn read_json(path: &Path) -> Result<Value, ReferenceError> {
    let bytes = read_bytes(path)?;
    serde_json::from_slice(&bytes).map_err(|e| ReferenceError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Normalizes a JSON scalar to a trimmed string ("" for null).
pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Reads a field from a JSON object row, "" when absent.
pub(crate) fn field(row: &serde_json::Map<String, Value>, key: &str) -> String {
    row.get(key).map(scalar).unwrap_or_default()
}

/// Read a CSV file into a vector of row maps keyed by header.
///
/// Handles BOM characters and trims whitespace from values.
pub(crate) fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, ReferenceError> {
    let bytes = read_bytes(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| ReferenceError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReferenceError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a list of object rows from either encoding as string maps.
pub(crate) fn read_rows(
    path: &Path,
    kind: TableKind,
) -> Result<Vec<BTreeMap<String, String>>, ReferenceError> {
    match kind {
        TableKind::Csv => read_csv_rows(path),
        TableKind::Json => {
            let value = read_json(path)?;
            let Value::Array(items) = value else {
                return Err(ReferenceError::invalid_table(path, "expected a JSON array"));
            };
            let mut rows = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let Value::Object(object) = item else {
                    return Err(ReferenceError::invalid_table(
                        path,
                        format!("row {idx} is not an object"),
                    ));
                };
                rows.push(
                    object
                        .iter()
                        .map(|(key, value)| (key.trim().to_string(), scalar(value)))
                        .collect(),
                );
            }
            Ok(rows)
        }
    }
}
