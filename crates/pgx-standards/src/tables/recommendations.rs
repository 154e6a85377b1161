#![deny(unsafe_code)]

use std::path::Path;

use pgx_model::{Gene, RecommendationRow};
use tracing::warn;

use crate::error::ReferenceError;
use crate::tables::{TableKind, read_rows};

/// Parse the guideline recommendation table (`Gene`, `Phenotype`, `RecText`).
///
/// Rows for genes outside the panel are skipped with a warning.
pub fn parse_recommendations(
    path: &Path,
    kind: TableKind,
) -> Result<Vec<RecommendationRow>, ReferenceError> {
    let rows = read_rows(path, kind)?;
    let mut out = Vec::with_capacity(rows.len());
    for (idx, mut row) in rows.into_iter().enumerate() {
        let gene_raw = row.remove("Gene").unwrap_or_default();
        let gene = match gene_raw.parse::<Gene>() {
            Ok(gene) => gene,
            Err(_) => {
                warn!(row = idx, gene = %gene_raw, path = %path.display(), "skipping recommendation for unsupported gene");
                continue;
            }
        };
        out.push(RecommendationRow {
            gene,
            phenotype: row.remove("Phenotype").unwrap_or_default(),
            rec_text: row.remove("RecText").unwrap_or_default(),
        });
    }
    Ok(out)
}
