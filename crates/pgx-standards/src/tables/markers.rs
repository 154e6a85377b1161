#![deny(unsafe_code)]

use std::path::Path;

use pgx_model::{Gene, MarkerDefinition};
use serde_json::Value;
use tracing::warn;

use crate::error::ReferenceError;
use crate::tables::{field, read_json, scalar};

/// Parse the marker table: a JSON object mapping gene symbol to a list of
/// marker rows with `column`, `rsid`, `ref`, `var`, `star` and `options`.
///
/// Genes the engine does not classify are skipped with a warning.
pub fn parse_markers_json(path: &Path) -> Result<Vec<MarkerDefinition>, ReferenceError> {
    let value = read_json(path)?;
    let Value::Object(by_gene) = value else {
        return Err(ReferenceError::invalid_table(
            path,
            "expected an object keyed by gene",
        ));
    };

    let mut markers = Vec::new();
    for (gene_key, rows) in &by_gene {
        let gene = match gene_key.parse::<Gene>() {
            Ok(gene) => gene,
            Err(_) => {
                warn!(gene = %gene_key, path = %path.display(), "skipping markers for unsupported gene");
                continue;
            }
        };
        let Value::Array(rows) = rows else {
            return Err(ReferenceError::invalid_table(
                path,
                format!("markers for {gene_key} must be a list"),
            ));
        };
        for (idx, row) in rows.iter().enumerate() {
            let Value::Object(row) = row else {
                return Err(ReferenceError::invalid_table(
                    path,
                    format!("{gene_key} marker {idx} is not an object"),
                ));
            };
            let column = field(row, "column");
            if column.is_empty() {
                return Err(ReferenceError::invalid_table(
                    path,
                    format!("{gene_key} marker {idx} has no column"),
                ));
            }
            let options = match row.get("options") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(scalar)
                    .filter(|option| !option.is_empty())
                    .collect(),
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(ReferenceError::invalid_table(
                        path,
                        format!("options of {column} must be a list"),
                    ));
                }
            };
            markers.push(MarkerDefinition {
                gene,
                column,
                rsid: field(row, "rsid"),
                ref_allele: field(row, "ref"),
                var_allele: field(row, "var"),
                star_allele: field(row, "star"),
                options,
            });
        }
    }
    Ok(markers)
}

/// Parse the selectable CYP2D6 star list (a JSON array of labels).
pub fn parse_star_list_json(path: &Path) -> Result<Vec<String>, ReferenceError> {
    let value = read_json(path)?;
    let Value::Array(items) = value else {
        return Err(ReferenceError::invalid_table(path, "expected a JSON array"));
    };
    Ok(items
        .iter()
        .map(scalar)
        .filter(|star| !star.is_empty())
        .collect())
}
