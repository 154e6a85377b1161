//! Report aggregation of the three gene results.

use pgx_model::{GeneResult, SummaryRow};

/// Builds the summary rows in report order: DPYD, CYP2D6, UGT1A1.
///
/// Nothing is ranked, filtered or merged.
pub fn summarize(dpyd: &GeneResult, cyp2d6: &GeneResult, ugt1a1: &GeneResult) -> Vec<SummaryRow> {
    [dpyd, cyp2d6, ugt1a1]
        .into_iter()
        .map(SummaryRow::from)
        .collect()
}

/// Joins the polymorphism notes of `results` with "; ", in iteration order.
pub fn join_polymorphisms<'a>(results: impl IntoIterator<Item = &'a GeneResult>) -> String {
    results
        .into_iter()
        .flat_map(|result| result.polymorphism_notes.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("; ")
}
