//! Classification results.

use serde::{Deserialize, Serialize};

use crate::{Gene, Phenotype};

/// Outcome of one gene classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneResult {
    pub gene: Gene,
    /// Diplotype in "A1/A2" form.
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub recommendation: String,
    /// One line per observed marker (or the manual diplotype), for traceability.
    pub polymorphism_notes: Vec<String>,
    /// Variant occurrences beyond the first two that did not enter the diplotype.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dropped_occurrences: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl GeneResult {
    /// Spanish phenotype label for the report.
    pub fn phenotype_label(&self) -> &'static str {
        self.phenotype.label(self.gene)
    }

    pub fn drug_of_interest(&self) -> &'static str {
        self.gene.drug_of_interest()
    }
}

/// One row of the report summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub gene: Gene,
    pub diplotype: String,
    /// Display label (e.g., "Metabolizador intermedio").
    pub phenotype: String,
    pub drug_of_interest: String,
    pub recommendation: String,
    /// Category behind the display label, used for risk shading.
    pub category: Phenotype,
}

impl From<&GeneResult> for SummaryRow {
    fn from(result: &GeneResult) -> Self {
        Self {
            gene: result.gene,
            diplotype: result.diplotype.clone(),
            phenotype: result.phenotype_label().to_string(),
            drug_of_interest: result.drug_of_interest().to_string(),
            recommendation: result.recommendation.clone(),
            category: result.phenotype,
        }
    }
}

/// Everything the report layer needs from one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// Per-gene results in report order (DPYD, CYP2D6, UGT1A1).
    pub results: Vec<GeneResult>,
    pub summary: Vec<SummaryRow>,
    /// Polymorphism notes of all genes joined with "; ".
    pub polymorphisms: String,
}

impl ClassificationOutcome {
    pub fn result(&self, gene: Gene) -> Option<&GeneResult> {
        self.results.iter().find(|result| result.gene == gene)
    }

    /// Returns true if any gene calls for a dosing change.
    pub fn has_actionable(&self) -> bool {
        self.results
            .iter()
            .any(|result| result.phenotype.is_actionable())
    }
}
