#![deny(unsafe_code)]

use std::path::Path;

use pgx_model::CypPhenotypeRow;

use crate::error::ReferenceError;
use crate::tables::{TableKind, read_rows};

pub const DIPLOTYPE_HEADER: &str = "CYP2D6 Diplotype";
pub const SUMMARY_HEADER: &str = "Coded Diplotype/Phenotype Summary";

/// Parse the CYP2D6 diplotype to phenotype table.
///
/// Rows without a diplotype are skipped; table order is kept so that the
/// first row wins for repeated diplotypes.
pub fn parse_cyp2d6_phenotypes(
    path: &Path,
    kind: TableKind,
) -> Result<Vec<CypPhenotypeRow>, ReferenceError> {
    let rows = read_rows(path, kind)?;
    if let Some(first) = rows.first() {
        for header in [DIPLOTYPE_HEADER, SUMMARY_HEADER] {
            if !first.contains_key(header) {
                return Err(ReferenceError::invalid_table(
                    path,
                    format!("missing column '{header}'"),
                ));
            }
        }
    }

    Ok(rows
        .into_iter()
        .filter_map(|mut row| {
            let diplotype = row.remove(DIPLOTYPE_HEADER).unwrap_or_default();
            if diplotype.is_empty() {
                return None;
            }
            Some(CypPhenotypeRow {
                diplotype,
                summary: row.remove(SUMMARY_HEADER).unwrap_or_default(),
            })
        })
        .collect())
}
